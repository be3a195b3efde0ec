//! Pricing DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pricing::{LineItem, PricingContext, ResolvedPrice};
use crate::domain::shared::{CurrencyCode, ItemQuantity, Money, ProductId};

/// Request to price one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePriceRequest {
    /// Caller pricing context.
    #[serde(default)]
    pub context: PricingContext,
    /// Item to price.
    pub item: LineItem,
}

/// Request to price a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatePricesRequest {
    /// Caller pricing context.
    #[serde(default)]
    pub context: PricingContext,
    /// Items to price.
    pub items: Vec<LineItem>,
}

/// One priced item of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedItem {
    /// Position in the request.
    pub index: usize,
    /// Product.
    pub product_id: ProductId,
    /// SKU.
    pub sku: String,
    /// Units.
    pub quantity: ItemQuantity,
    /// Resolved unit price.
    pub price: ResolvedPrice,
    /// Unit price times quantity.
    pub line_total: Money,
}

/// Result of pricing a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceAggregate {
    /// Sum of line totals.
    pub total: Money,
    /// Currency of the last remote price observed, else the store default.
    pub currency: CurrencyCode,
    /// Per-item results in request order.
    pub items: Vec<PricedItem>,
    /// Items priced by the ERP.
    pub remote_count: usize,
    /// Items priced from the catalog.
    pub fallback_count: usize,
}

impl PriceAggregate {
    /// True when no item was priced remotely.
    #[must_use]
    pub const fn is_fully_degraded(&self) -> bool {
        self.remote_count == 0
    }
}
