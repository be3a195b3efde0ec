//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `webhook/`: Shared JSON-over-HTTP client with retries
//!   - `erp/`: ERP pricing, cart price sync and order lookup webhooks
//!   - `graphql/`: B2B company and storefront catalog APIs
//!   - `documents/`: Invoice download, PDF stamping, HTML replacement
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - `config/`: Dependency injection container

pub mod config;
pub mod documents;
pub mod erp;
pub mod graphql;
pub mod http;
pub mod webhook;
