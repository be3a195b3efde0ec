//! Data Transfer Objects
//!
//! Request and response shapes at the application boundary.

mod cart_dto;
mod pricing_dto;

pub use cart_dto::{MatchedLineDto, ReconcileCartRequest, ReconciliationReport};
pub use pricing_dto::{AggregatePricesRequest, PriceAggregate, PricedItem, ResolvePriceRequest};
