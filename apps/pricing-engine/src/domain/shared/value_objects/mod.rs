//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod currency;
mod identifiers;
mod money;
mod quantity;

pub use currency::{CurrencyCode, DEFAULT_CURRENCY};
pub use identifiers::{
    CartId, CustomerId, ExternalOrderId, GroupCode, LineId, LocalOrderId, ProductId, UserId,
    VariantId,
};
pub use money::Money;
pub use quantity::ItemQuantity;
