//! Application Ports (Driven)
//!
//! Ports define interfaces for the external systems the engine talks to:
//! the ERP pricing and order webhooks, the cart price-sync webhook, the B2B
//! and storefront GraphQL APIs, and the document host.

mod company_field_provider;
mod document_ports;
mod order_lookup_port;
mod price_sync_port;
mod pricing_source_port;
mod product_fields_port;

pub use company_field_provider::{CompanyFieldProvider, CompanyLookupError, PresetCompanyFields};
pub use document_ports::{
    DocumentRewriteError, DocumentSourceError, DocumentSourcePort, IdentifierStamper,
};
pub use order_lookup_port::{OrderLookupError, OrderLookupPort};
pub use price_sync_port::{PriceSyncBatch, PriceSyncError, PriceSyncPort};
pub use pricing_source_port::{PricingRequest, PricingSourceError, PricingSourcePort};
pub use product_fields_port::{ProductFieldsError, ProductFieldsPort};

#[cfg(test)]
pub use company_field_provider::MockCompanyFieldProvider;
#[cfg(test)]
pub use document_ports::{MockDocumentSourcePort, MockIdentifierStamper};
#[cfg(test)]
pub use order_lookup_port::MockOrderLookupPort;
#[cfg(test)]
pub use price_sync_port::MockPriceSyncPort;
#[cfg(test)]
pub use pricing_source_port::MockPricingSourcePort;
#[cfg(test)]
pub use product_fields_port::MockProductFieldsPort;
