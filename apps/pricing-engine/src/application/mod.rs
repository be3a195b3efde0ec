//! Application Layer
//!
//! The application layer orchestrates domain logic. It defines:
//!
//! - **Ports**: interfaces to the ERP, storefront and document host
//! - **Services**: caching resolvers and the document rewriter
//! - **Use Cases**: batch pricing, cart reconciliation, invoice rendering
//! - **DTOs**: data transfer objects for API boundaries

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use services::*;
pub use use_cases::*;
