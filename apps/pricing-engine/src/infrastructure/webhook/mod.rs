//! Remote HTTP endpoint client.
//!
//! Every outbound integration (ERP webhooks, GraphQL APIs, document host)
//! goes through [`WebhookHttpClient`], which applies an explicit timeout and
//! bounded exponential backoff on network errors, 408, 429 and 5xx.

mod config;
mod error;
mod http_client;

pub use config::{RetryConfig, WebhookClientConfig};
pub use error::WebhookError;
pub use http_client::WebhookHttpClient;
