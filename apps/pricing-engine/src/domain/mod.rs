//! Domain Layer
//!
//! Core business logic with no I/O. Organized by bounded context:
//!
//! - `pricing`: pricing contexts, line items, resolved prices, catalog fallback
//! - `cart`: cart line matching and the post-synchronization settling policy
//! - `company`: ERP identifiers carried on company profiles
//! - `catalog`: product custom fields
//! - `documents`: invoice identifier rewrite decisions
//! - `shared`: identifiers, money, quantities, errors

pub mod cart;
pub mod catalog;
pub mod company;
pub mod documents;
pub mod pricing;
pub mod shared;
