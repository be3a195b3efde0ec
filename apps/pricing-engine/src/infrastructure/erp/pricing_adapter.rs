//! ERP pricing webhook adapter.

use async_trait::async_trait;

use super::api_types::normalize_pricing_response;
use crate::application::ports::{PricingRequest, PricingSourceError, PricingSourcePort};
use crate::domain::pricing::RemotePricingResult;
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

/// Prices items by POSTing to the ERP pricing webhook.
#[derive(Debug, Clone)]
pub struct ErpPricingAdapter {
    client: WebhookHttpClient,
    endpoint: String,
}

impl ErpPricingAdapter {
    /// Create an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, config: &WebhookClientConfig) -> Result<Self, WebhookError> {
        Ok(Self {
            client: WebhookHttpClient::new(config)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PricingSourcePort for ErpPricingAdapter {
    async fn fetch_price(
        &self,
        request: &PricingRequest,
    ) -> Result<RemotePricingResult, PricingSourceError> {
        tracing::debug!(
            product_id = %request.product_id,
            sku = %request.sku,
            quantity = %request.quantity,
            "Requesting ERP price"
        );

        let payload = match self.client.post_json(&self.endpoint, request, None).await {
            Ok(payload) => payload,
            Err(WebhookError::JsonParse(reason)) => {
                return Ok(RemotePricingResult::Malformed { reason });
            }
            Err(e) => return Err(PricingSourceError::from(e)),
        };

        let result = normalize_pricing_response(payload);
        if !matches!(result, RemotePricingResult::Valid { .. }) {
            tracing::warn!(
                product_id = %request.product_id,
                kind = result.kind(),
                "ERP returned no usable price"
            );
        }
        Ok(result)
    }
}
