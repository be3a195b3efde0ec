//! Company Bounded Context
//!
//! ERP identifiers attached to B2B companies.

mod fields;

pub use fields::{
    CompanyField, CompanyPricingFields, ExtraField, extract_company_fields, normalize_field_name,
};
