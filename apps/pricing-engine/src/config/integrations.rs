//! Order lookup, B2B company and storefront catalog endpoints.

use serde::{Deserialize, Serialize};

use super::ClientSettings;

/// ERP order-number lookup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Lookup webhook URL; called with `?orderId=`.
    #[serde(default)]
    pub endpoint: String,
    /// Client timeout and retry policy.
    #[serde(default)]
    pub client: ClientSettings,
}

/// A GraphQL endpoint with optional bearer authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphqlEndpointConfig {
    /// GraphQL endpoint URL. Empty disables the integration.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// Client timeout and retry policy.
    #[serde(default)]
    pub client: ClientSettings,
}

impl GraphqlEndpointConfig {
    /// Whether an endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }

    /// Token, ignoring blank values.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}
