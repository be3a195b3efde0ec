//! Application Use Cases
//!
//! Use cases orchestrate domain logic and services to fulfil requests.

mod aggregate_prices;
mod reconcile_cart;
mod render_invoice_document;

pub use aggregate_prices::AggregatePricesUseCase;
pub use reconcile_cart::{ReconcileCartUseCase, Settlement};
pub use render_invoice_document::{RenderInvoiceDocumentUseCase, RenderedInvoice};
