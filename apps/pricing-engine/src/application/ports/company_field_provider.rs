//! Company Field Provider (Driven Port)
//!
//! A named source of a company's ERP identifiers. Several providers are
//! chained by [`crate::application::services::CompanyFieldChain`].

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::company::CompanyPricingFields;
use crate::domain::shared::UserId;

/// Company lookup error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompanyLookupError {
    /// The provider could not be reached.
    #[error("Company lookup unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The provider answered with something unusable.
    #[error("Company lookup response could not be decoded: {message}")]
    Decode {
        /// Error details.
        message: String,
    },
}

/// Capability: ERP identifiers for the company of a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyFieldProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Fields for `user_id`, or `None` when this provider knows nothing.
    async fn fields_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CompanyPricingFields>, CompanyLookupError>;
}

/// Customer data pushed by the storefront page itself.
///
/// The highest-priority provider: when the page already knows the company's
/// ERP identifiers there is no need to ask the B2B API.
#[derive(Debug, Default)]
pub struct PresetCompanyFields {
    entries: RwLock<HashMap<UserId, CompanyPricingFields>>,
}

impl PresetCompanyFields {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register fields for a user, replacing any previous entry.
    pub fn insert(&self, user_id: UserId, fields: CompanyPricingFields) {
        self.entries.write().insert(user_id, fields);
    }
}

#[async_trait]
impl CompanyFieldProvider for PresetCompanyFields {
    fn name(&self) -> &'static str {
        "preset"
    }

    async fn fields_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CompanyPricingFields>, CompanyLookupError> {
        Ok(self.entries.read().get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{CustomerId, GroupCode};

    #[tokio::test]
    async fn preset_returns_registered_fields() {
        let preset = PresetCompanyFields::new();
        let fields = CompanyPricingFields {
            customer_id: Some(CustomerId::new("C1")),
            group_code: Some(GroupCode::new("G1")),
        };
        preset.insert(UserId::new("7"), fields.clone());

        assert_eq!(preset.fields_for(&UserId::new("7")).await.unwrap(), Some(fields));
        assert_eq!(preset.fields_for(&UserId::new("8")).await.unwrap(), None);
    }
}
