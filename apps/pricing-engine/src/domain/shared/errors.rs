//! Domain errors for the pricing engine.

use thiserror::Error;

/// A value rejected by a domain constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
