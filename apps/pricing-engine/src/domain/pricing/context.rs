//! Caller entitlement to ERP pricing.

use serde::{Deserialize, Serialize};

use crate::domain::company::CompanyPricingFields;
use crate::domain::shared::{CustomerId, GroupCode};

/// Storefront customer role code for retail (non-company) shoppers.
pub const RETAIL_ROLE: u8 = 2;

/// The caller's entitlement to privileged pricing.
///
/// Immutable per resolution request. Derived once per session/company by the
/// caller; the engine never caches it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingContext {
    /// ERP customer identifier, if known.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// ERP pricing group code, if known.
    #[serde(default)]
    pub group_code: Option<GroupCode>,
    /// Whether the caller may query the ERP at all.
    #[serde(default)]
    pub is_privileged: bool,
}

impl PricingContext {
    /// Anonymous / retail context. Always priced from the catalog.
    #[must_use]
    pub fn retail() -> Self {
        Self::default()
    }

    /// Privileged context with both identifiers present.
    #[must_use]
    pub fn privileged(customer_id: impl Into<CustomerId>, group_code: impl Into<GroupCode>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            group_code: Some(group_code.into()),
            is_privileged: true,
        }
    }

    /// Build a context from a customer role and the company's ERP fields.
    #[must_use]
    pub fn from_company(role: u8, fields: CompanyPricingFields) -> Self {
        Self {
            customer_id: fields.customer_id,
            group_code: fields.group_code,
            is_privileged: role != RETAIL_ROLE,
        }
    }

    /// Customer id, ignoring blank values.
    #[must_use]
    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref().filter(|id| !id.is_blank())
    }

    /// Group code, ignoring blank values.
    #[must_use]
    pub fn group_code(&self) -> Option<&GroupCode> {
        self.group_code.as_ref().filter(|code| !code.is_blank())
    }

    /// True when both identifiers are present.
    ///
    /// A partial context is indistinguishable from a company lookup that is
    /// still in flight, so only complete contexts may touch the price cache.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.customer_id().is_some() && self.group_code().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retail_is_not_privileged() {
        let ctx = PricingContext::retail();
        assert!(!ctx.is_privileged);
        assert!(!ctx.is_cacheable());
    }

    #[test]
    fn blank_identifiers_are_absent() {
        let ctx = PricingContext {
            customer_id: Some(CustomerId::new("  ")),
            group_code: Some(GroupCode::new("G1")),
            is_privileged: true,
        };
        assert!(ctx.customer_id().is_none());
        assert!(!ctx.is_cacheable());
    }

    #[test]
    fn from_company_uses_role() {
        let fields = CompanyPricingFields {
            customer_id: Some(CustomerId::new("C1")),
            group_code: Some(GroupCode::new("G1")),
        };

        let b2b = PricingContext::from_company(1, fields.clone());
        assert!(b2b.is_privileged);
        assert!(b2b.is_cacheable());

        let retail = PricingContext::from_company(RETAIL_ROLE, fields);
        assert!(!retail.is_privileged);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let ctx: PricingContext = serde_json::from_str(r#"{"is_privileged":true}"#).unwrap();
        assert!(ctx.is_privileged);
        assert!(ctx.customer_id.is_none());
    }
}
