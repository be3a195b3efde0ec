//! Product Fields Port (Driven Port)
//!
//! Reads catalog product custom fields.

use async_trait::async_trait;

use crate::domain::catalog::CustomField;
use crate::domain::shared::ProductId;

/// Product field lookup error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProductFieldsError {
    /// The catalog API could not be reached.
    #[error("Catalog unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The catalog API answered with something unusable.
    #[error("Catalog response could not be decoded: {message}")]
    Decode {
        /// Error details.
        message: String,
    },
}

/// Port for catalog product custom fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductFieldsPort: Send + Sync {
    /// Custom fields of `product_id`. Unknown products have none.
    async fn custom_fields(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CustomField>, ProductFieldsError>;
}
