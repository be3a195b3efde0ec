//! ERP order lookup webhook adapter.

use async_trait::async_trait;

use super::api_types::extract_external_order_id;
use crate::application::ports::{OrderLookupError, OrderLookupPort};
use crate::domain::shared::{ExternalOrderId, LocalOrderId};
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

/// Looks up ERP order numbers with `GET <endpoint>?orderId=<id>`.
#[derive(Debug, Clone)]
pub struct ErpOrderLookupAdapter {
    client: WebhookHttpClient,
    endpoint: String,
}

impl ErpOrderLookupAdapter {
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
impl OrderLookupPort for ErpOrderLookupAdapter {
    async fn external_order_id(
        &self,
        order_id: &LocalOrderId,
    ) -> Result<Option<ExternalOrderId>, OrderLookupError> {
        let payload = self
            .client
            .get_json(&self.endpoint, &[("orderId", order_id.as_str())])
            .await
            .map_err(OrderLookupError::from)?;

        let external = extract_external_order_id(&payload);
        tracing::debug!(%order_id, found = external.is_some(), "ERP order lookup finished");
        Ok(external)
    }
}
