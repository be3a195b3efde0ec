//! Order Lookup Port (Driven Port)
//!
//! Maps a storefront order number to the ERP's order number.

use async_trait::async_trait;

use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Order lookup error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderLookupError {
    /// The lookup endpoint could not be reached.
    #[error("Order lookup unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("Order lookup returned HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not JSON.
    #[error("Order lookup response could not be decoded: {message}")]
    Decode {
        /// Error details.
        message: String,
    },
}

/// Port for the remote order-identifier lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLookupPort: Send + Sync {
    /// ERP order number for `order_id`, or `None` when the ERP has none.
    async fn external_order_id(
        &self,
        order_id: &LocalOrderId,
    ) -> Result<Option<ExternalOrderId>, OrderLookupError>;
}
