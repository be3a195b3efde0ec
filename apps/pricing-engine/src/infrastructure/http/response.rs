//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ExternalOrderId, LocalOrderId, ProductId};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

/// ERP order number for a storefront order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalOrderIdResponse {
    /// Storefront order number.
    pub local_order_id: LocalOrderId,
    /// ERP order number, `null` when unknown.
    pub external_order_id: Option<ExternalOrderId>,
}

/// Show-price flag of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowPriceResponse {
    /// Product.
    pub product_id: ProductId,
    /// Whether the price may be displayed.
    pub show_price: bool,
}

/// Result of clearing the price cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearedResponse {
    /// Entries removed.
    pub cleared: usize,
}
