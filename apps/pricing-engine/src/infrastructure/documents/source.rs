//! Document download over HTTP.

use async_trait::async_trait;

use crate::application::ports::{DocumentSourceError, DocumentSourcePort};
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

/// Downloads rendered invoices from the document host.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: WebhookHttpClient,
}

impl HttpDocumentSource {
    /// Create a document source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &WebhookClientConfig) -> Result<Self, WebhookError> {
        Ok(Self {
            client: WebhookHttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl DocumentSourcePort for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentSourceError> {
        let bytes = self.client.get_bytes(url).await.map_err(DocumentSourceError::from)?;
        tracing::debug!(url, size = bytes.len(), "Document downloaded");
        Ok(bytes)
    }
}
