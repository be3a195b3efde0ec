//! ERP integration adapters.
//!
//! The ERP is reached through three webhooks: per-item pricing, cart price
//! synchronization and order-number lookup. Their payloads are loosely typed;
//! [`api_types`] normalizes them before anything reaches the application.

pub mod api_types;
mod order_lookup_adapter;
mod price_sync_adapter;
mod pricing_adapter;

pub use order_lookup_adapter::ErpOrderLookupAdapter;
pub use price_sync_adapter::{CartPriceSyncAdapter, StoreCredentials};
pub use pricing_adapter::ErpPricingAdapter;
