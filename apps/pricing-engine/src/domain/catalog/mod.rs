//! Catalog Bounded Context
//!
//! Storefront product metadata consumed by pricing display rules.

mod custom_fields;

pub use custom_fields::{CustomField, SHOW_PRICE_FIELD, show_price_enabled};
