//! Ordered company field providers.

use std::sync::Arc;

use crate::application::ports::CompanyFieldProvider;
use crate::domain::company::CompanyPricingFields;
use crate::domain::pricing::PricingContext;
use crate::domain::shared::UserId;

/// Tries each provider in priority order; the first `Some` wins.
///
/// Provider errors are logged and the next provider is tried.
#[derive(Clone, Default)]
pub struct CompanyFieldChain {
    providers: Vec<Arc<dyn CompanyFieldProvider>>,
}

impl std::fmt::Debug for CompanyFieldChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("CompanyFieldChain")
            .field("providers", &names)
            .finish()
    }
}

impl CompanyFieldChain {
    /// Create a chain from providers in priority order.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn CompanyFieldProvider>>) -> Self {
        Self { providers }
    }

    /// ERP identifiers for the company of `user_id`.
    pub async fn fields_for(&self, user_id: &UserId) -> Option<CompanyPricingFields> {
        for provider in &self.providers {
            match provider.fields_for(user_id).await {
                Ok(Some(fields)) => {
                    tracing::debug!(provider = provider.name(), %user_id, "Company fields found");
                    return Some(fields);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        %user_id,
                        "Company field provider failed, trying next"
                    );
                }
            }
        }
        None
    }

    /// Pricing context for a user with storefront role `role`.
    pub async fn pricing_context(&self, user_id: &UserId, role: u8) -> PricingContext {
        let fields = self.fields_for(user_id).await.unwrap_or_default();
        PricingContext::from_company(role, fields)
    }
}
