//! Document Ports (Driven Ports)
//!
//! Fetching rendered invoices and stamping identifiers into them.

use async_trait::async_trait;

use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Document fetch error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentSourceError {
    /// The document host could not be reached.
    #[error("Document source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The host answered with a non-success status.
    #[error("Document source returned HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },
}

/// Port for downloading a rendered document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentSourcePort: Send + Sync {
    /// Raw bytes of the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentSourceError>;
}

/// Identifier stamping error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentRewriteError {
    /// The document could not be parsed.
    #[error("Document could not be parsed: {0}")]
    Parse(String),

    /// The identifier region could not be found.
    #[error("Identifier region not found: {0}")]
    RegionNotFound(String),

    /// The modified document could not be written.
    #[error("Document could not be encoded: {0}")]
    Encode(String),
}

/// Format-specific identifier stamping.
///
/// Implementations perform only the replacement; the decision to rewrite and
/// the passthrough-on-error policy live in
/// [`crate::application::services::DocumentIdentifierRewriter`].
#[cfg_attr(test, mockall::automock)]
pub trait IdentifierStamper: Send + Sync {
    /// Format name for logs and metrics.
    fn format(&self) -> &'static str;

    /// Replace `local` with `external` in `document`.
    fn stamp(
        &self,
        document: &[u8],
        local: &LocalOrderId,
        external: &ExternalOrderId,
    ) -> Result<Vec<u8>, DocumentRewriteError>;
}
