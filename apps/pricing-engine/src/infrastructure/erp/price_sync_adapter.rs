//! Cart price-synchronization webhook adapter.

use async_trait::async_trait;

use super::api_types::CartPriceUpdateRequest;
use crate::application::ports::{PriceSyncBatch, PriceSyncError, PriceSyncPort};
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

/// Storefront credentials forwarded to the sync endpoint.
#[derive(Debug, Clone, Default)]
pub struct StoreCredentials {
    /// Store hash.
    pub store_hash: String,
    /// API token.
    pub auth_token: String,
}

/// Pushes resolved cart prices to the ERP integration webhook.
#[derive(Debug, Clone)]
pub struct CartPriceSyncAdapter {
    client: WebhookHttpClient,
    endpoint: String,
    credentials: StoreCredentials,
}

impl CartPriceSyncAdapter {
    /// Create an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        credentials: StoreCredentials,
        config: &WebhookClientConfig,
    ) -> Result<Self, WebhookError> {
        Ok(Self {
            client: WebhookHttpClient::new(config)?,
            endpoint: endpoint.into(),
            credentials,
        })
    }
}

#[async_trait]
impl PriceSyncPort for CartPriceSyncAdapter {
    async fn push_prices(&self, batch: &PriceSyncBatch) -> Result<(), PriceSyncError> {
        let body = CartPriceUpdateRequest::new(
            batch,
            &self.credentials.store_hash,
            &self.credentials.auth_token,
        );

        tracing::info!(
            cart_id = %batch.cart_id,
            total_items = body.total_items,
            "Sending cart price update"
        );

        // Any 2xx counts as accepted, whatever the body says.
        match self.client.post_json(&self.endpoint, &body, None).await {
            Ok(_) | Err(WebhookError::JsonParse(_)) => Ok(()),
            Err(e) => Err(PriceSyncError::from(e)),
        }
    }
}
