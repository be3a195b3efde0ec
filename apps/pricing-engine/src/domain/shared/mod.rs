//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    CartId, CurrencyCode, CustomerId, DEFAULT_CURRENCY, ExternalOrderId, GroupCode, ItemQuantity,
    LineId, LocalOrderId, Money, ProductId, UserId, VariantId,
};
