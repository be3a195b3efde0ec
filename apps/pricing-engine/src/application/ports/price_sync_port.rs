//! Price Sync Port (Driven Port)
//!
//! Interface to the remote cart price-synchronization endpoint.

use async_trait::async_trait;

use crate::domain::cart::ReconciliationRecord;
use crate::domain::shared::CartId;

/// Every matched line of one cart, sent as a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSyncBatch {
    /// Cart being repriced.
    pub cart_id: CartId,
    /// Lines to reprice.
    pub records: Vec<ReconciliationRecord>,
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

/// Price synchronization error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceSyncError {
    /// The endpoint answered with a non-success status.
    #[error("Webhook error: {status}{}", body_suffix(.body))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body text, possibly empty.
        body: String,
    },

    /// The endpoint could not be reached.
    #[error("Price sync unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for pushing resolved prices into a persisted cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSyncPort: Send + Sync {
    /// Submit one batch. `Ok` means the endpoint accepted it, not that the
    /// cart already reflects it.
    async fn push_prices(&self, batch: &PriceSyncBatch) -> Result<(), PriceSyncError>;
}
