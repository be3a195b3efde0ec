//! Remote client error types and their mapping into port errors.

use thiserror::Error;

use crate::application::ports::{
    CompanyLookupError, DocumentSourceError, OrderLookupError, PriceSyncError, PricingSourceError,
    ProductFieldsError,
};

/// Errors from a remote HTTP endpoint.
#[derive(Debug, Error, Clone)]
pub enum WebhookError {
    /// The client could not be built or the request could not be prepared.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Network error after all retries.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, possibly empty.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<WebhookError> for PricingSourceError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::Status { status, .. } => Self::Rejected { status },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<WebhookError> for PriceSyncError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::Status { status, body } => Self::Rejected { status, body },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<WebhookError> for OrderLookupError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::Status { status, .. } => Self::Rejected { status },
            WebhookError::JsonParse(message) => Self::Decode { message },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<WebhookError> for CompanyLookupError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::JsonParse(message) => Self::Decode { message },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<WebhookError> for ProductFieldsError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::JsonParse(message) => Self::Decode { message },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<WebhookError> for DocumentSourceError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::Status { status, .. } => Self::Rejected { status },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}
