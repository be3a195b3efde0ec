//! Price cache keys.

use std::fmt;

use super::{LineItem, PricingContext};
use crate::domain::shared::{CustomerId, GroupCode, ItemQuantity, ProductId};

/// Cache key for a (context, item) pair.
///
/// Compared field by field, so identifiers containing the display separator
/// never collide. Quantity is part of the key because ERP prices may be
/// quantity-tiered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceFingerprint {
    customer_id: Option<CustomerId>,
    group_code: Option<GroupCode>,
    product_id: ProductId,
    sku: String,
    quantity: ItemQuantity,
}

impl PriceFingerprint {
    /// Derive the fingerprint for `item` under `context`.
    #[must_use]
    pub fn of(context: &PricingContext, item: &LineItem) -> Self {
        Self {
            customer_id: context.customer_id().cloned(),
            group_code: context.group_code().cloned(),
            product_id: item.product_id.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
        }
    }
}

impl fmt::Display for PriceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self.customer_id.as_ref().map_or("null", CustomerId::as_str);
        let group = self.group_code.as_ref().map_or("null", GroupCode::as_str);
        write!(
            f,
            "{customer}-{group}-{}-{}-{}",
            self.product_id, self.sku, self.quantity
        )
    }
}
