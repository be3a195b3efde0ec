//! Pricing Bounded Context
//!
//! Pricing contexts, line items, resolved prices and the catalog fallback.
//! The ERP itself is a black box reached through
//! [`crate::application::ports::PricingSourcePort`].

mod context;
mod fallback;
mod fingerprint;
mod line_item;
mod remote_result;
mod resolved_price;

pub use context::{PricingContext, RETAIL_ROLE};
pub use fallback::{CatalogPriceFallback, TaxDisplay};
pub use fingerprint::PriceFingerprint;
pub use line_item::{LineItem, VariantPrice};
pub use remote_result::RemotePricingResult;
pub use resolved_price::{PriceSource, ResolvedPrice};
