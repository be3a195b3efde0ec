//! Application Services
//!
//! Stateful building blocks shared by the use cases: the price cache, the
//! resolvers and the document rewriter.

mod company_fields;
mod document_rewriter;
mod order_identifier_resolver;
mod price_cache;
mod pricing_resolver;
mod show_price_resolver;

pub use company_fields::CompanyFieldChain;
pub use document_rewriter::{DocumentIdentifierRewriter, RewriteOutcome, RewriteStatus};
pub use order_identifier_resolver::OrderIdentifierResolver;
pub use price_cache::PriceCache;
pub use pricing_resolver::PricingResolver;
pub use show_price_resolver::ShowPriceResolver;
