//! Company extra-field extraction.
//!
//! Companies carry free-form `extraFields` whose names were typed by hand in
//! the B2B admin, so the same field shows up as `CustID`, `custId`,
//! `Epicor GroupCode`, `EPICOR GROUPCODE` and so on. Names are normalized
//! before being compared to a fixed alias set per logical field.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{CustomerId, GroupCode};

/// Normalized aliases for the ERP customer id field.
const CUSTOMER_ID_ALIASES: &[&str] = &["custid"];

/// Normalized aliases for the ERP pricing group field.
const GROUP_CODE_ALIASES: &[&str] = &["epicorgroupcode"];

/// One `{fieldName, fieldValue}` pair from a company profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraField {
    /// Field name as entered in the admin.
    pub field_name: String,
    /// Field value.
    #[serde(default)]
    pub field_value: String,
}

impl ExtraField {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: name.into(),
            field_value: value.into(),
        }
    }
}

/// Logical company fields the pricing engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    /// ERP customer id.
    CustomerId,
    /// ERP pricing group code.
    GroupCode,
}

impl CompanyField {
    /// Identify a field by its raw name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_field_name(name);
        if CUSTOMER_ID_ALIASES.contains(&normalized.as_str()) {
            Some(Self::CustomerId)
        } else if GROUP_CODE_ALIASES.contains(&normalized.as_str()) {
            Some(Self::GroupCode)
        } else {
            None
        }
    }
}

/// ERP identifiers of a company.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyPricingFields {
    /// ERP customer id.
    pub customer_id: Option<CustomerId>,
    /// ERP pricing group code.
    pub group_code: Option<GroupCode>,
}

impl CompanyPricingFields {
    /// True when both identifiers are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.customer_id.is_some() && self.group_code.is_some()
    }
}

/// Lowercase, trim and drop all whitespace.
#[must_use]
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pull the ERP identifiers out of a company's extra fields.
///
/// When a field appears more than once the last occurrence wins, including
/// an empty one, which clears the value.
#[must_use]
pub fn extract_company_fields(extra_fields: &[ExtraField]) -> CompanyPricingFields {
    let mut fields = CompanyPricingFields::default();

    for field in extra_fields {
        let value = field.field_value.trim();
        let value = (!value.is_empty()).then_some(value);
        match CompanyField::from_name(&field.field_name) {
            Some(CompanyField::CustomerId) => fields.customer_id = value.map(CustomerId::new),
            Some(CompanyField::GroupCode) => fields.group_code = value.map(GroupCode::new),
            None => {}
        }
    }

    fields
}
