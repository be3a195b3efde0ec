//! Pricing Source Port (Driven Port)
//!
//! Interface to the remote ERP pricing source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::{LineItem, PricingContext, RemotePricingResult};
use crate::domain::shared::{CustomerId, GroupCode, ItemQuantity, ProductId};

/// One pricing request.
///
/// Missing identifiers are sent as explicit nulls so the ERP can apply its
/// own default policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// ERP customer id.
    pub customer_id: Option<CustomerId>,
    /// ERP pricing group code.
    #[serde(rename = "customer_group_code")]
    pub group_code: Option<GroupCode>,
    /// Ship-to number; always empty for storefront pricing.
    pub ship_to_num: String,
    /// Catalog product.
    pub product_id: ProductId,
    /// SKU.
    pub sku: String,
    /// Units.
    pub quantity: ItemQuantity,
}

impl PricingRequest {
    /// Build the request for `item` under `context`.
    #[must_use]
    pub fn new(context: &PricingContext, item: &LineItem) -> Self {
        Self {
            customer_id: context.customer_id().cloned(),
            group_code: context.group_code().cloned(),
            ship_to_num: String::new(),
            product_id: item.product_id.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
        }
    }
}

/// Pricing source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingSourceError {
    /// The source could not be reached.
    #[error("Pricing source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The source answered with a non-success status.
    #[error("Pricing source returned HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },
}

/// Port for the ERP pricing source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingSourcePort: Send + Sync {
    /// Price one item.
    ///
    /// A reachable source that returns an unusable payload yields
    /// `Ok(RemotePricingResult::Malformed)`, not an error.
    async fn fetch_price(
        &self,
        request: &PricingRequest,
    ) -> Result<RemotePricingResult, PricingSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Money;

    #[test]
    fn request_serializes_wire_names_and_nulls() {
        let ctx = PricingContext {
            customer_id: Some(CustomerId::new("C1")),
            group_code: None,
            is_privileged: true,
        };
        let item = LineItem::new("42", "A1", ItemQuantity::new(3).unwrap(), Money::ZERO);

        let json = serde_json::to_value(PricingRequest::new(&ctx, &item)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "customer_id": "C1",
                "customer_group_code": null,
                "ship_to_num": "",
                "product_id": "42",
                "sku": "A1",
                "quantity": 3
            })
        );
    }
}
