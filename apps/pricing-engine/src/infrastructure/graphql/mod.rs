//! GraphQL adapters for the B2B company API and the storefront catalog.
//!
//! Both APIs sometimes answer with a `data` wrapper and sometimes without;
//! each adapter accepts either.

mod company_provider;
mod product_fields_adapter;

pub use company_provider::GraphqlCompanyFieldProvider;
pub use product_fields_adapter::StorefrontProductFieldsAdapter;
