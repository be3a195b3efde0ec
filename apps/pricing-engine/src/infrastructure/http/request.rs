//! HTTP request DTOs.
//!
//! Pricing and reconciliation bodies reuse the application DTOs directly;
//! only the query strings and the invoice render body live here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Query for `POST /api/v1/documents/rewrite`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteDocumentQuery {
    /// Order number printed on the document.
    #[serde(default)]
    pub local_order_id: Option<LocalOrderId>,
    /// ERP order number to print instead. Looked up when absent.
    #[serde(default)]
    pub external_order_id: Option<ExternalOrderId>,
}

/// Query for `GET /api/v1/users/{user_id}/pricing-context`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingContextQuery {
    /// Storefront customer role. Absent means retail.
    #[serde(default)]
    pub role: Option<u8>,
}

/// Body for `POST /api/v1/documents/render`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderInvoiceRequest {
    /// Where the rendered invoice can be downloaded.
    pub document_url: String,
    /// Storefront order number.
    pub local_order_id: LocalOrderId,
    /// Mappings the caller already knows.
    #[serde(default)]
    pub known_mappings: HashMap<LocalOrderId, ExternalOrderId>,
}
