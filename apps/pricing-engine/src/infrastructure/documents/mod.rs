//! Invoice document adapters: download, PDF stamping and HTML replacement.

mod html;
mod pdf;
mod source;

pub use html::HtmlInvoiceRewriter;
pub use pdf::PdfInvoiceRewriter;
pub use source::HttpDocumentSource;
