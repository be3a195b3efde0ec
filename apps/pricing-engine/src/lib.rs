// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Pricing Engine - Rust Core Library
//!
//! ERP price resolution, cart price reconciliation and invoice order-number
//! rewriting for a B2B storefront.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure pricing and matching rules
//!   - `pricing`: contexts, line items, catalog fallback, cache fingerprints
//!   - `cart`: logical item to cart line matching, settling policy
//!   - `company` / `catalog`: ERP identifiers and product custom fields
//!   - `documents`: identifier rewrite decisions and PDF geometry
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for the ERP, storefront and document host
//!   - `services`: `PricingResolver`, `PriceCache`, `OrderIdentifierResolver`, ...
//!   - `use_cases`: `AggregatePrices`, `ReconcileCart`, `RenderInvoiceDocument`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `erp`: ERP webhooks
//!   - `graphql`: B2B company and storefront catalog APIs
//!   - `documents`: PDF and HTML invoice rewriting
//!   - `http`: REST API
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Metrics and distributed tracing.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::services::{PriceCache, PricingResolver};
pub use domain::cart::{CartLine, LogicalItem, match_cart_lines};
pub use domain::pricing::{LineItem, PricingContext, ResolvedPrice};
pub use domain::shared::{CurrencyCode, ItemQuantity, Money};
