//! Configuration module for the pricing engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for every remote integration the engine talks to.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pricing_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod client;
mod documents;
mod integrations;
mod observability;
mod pricing;
mod reconciliation;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::CurrencyCode;

pub use client::{ClientSettings, RetrySettings};
pub use documents::DocumentsConfig;
pub use integrations::{GraphqlEndpointConfig, OrdersConfig};
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use pricing::PricingConfig;
pub use reconciliation::ReconciliationConfig;
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// ERP pricing.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Cart price reconciliation.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// ERP order-number lookup.
    #[serde(default)]
    pub orders: OrdersConfig,
    /// B2B company GraphQL API.
    #[serde(default)]
    pub company: GraphqlEndpointConfig,
    /// Storefront catalog GraphQL API.
    #[serde(default)]
    pub catalog: GraphqlEndpointConfig,
    /// Invoice documents.
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A variable that is
/// set but empty takes the default.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == config.server.metrics_port {
        return Err(ConfigError::ValidationError(
            "http_port and metrics_port must be different".to_string(),
        ));
    }

    if config.pricing.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "pricing.cache_ttl_secs must be positive".to_string(),
        ));
    }

    if CurrencyCode::parse(&config.pricing.default_currency).is_none() {
        return Err(ConfigError::ValidationError(
            "pricing.default_currency must not be blank".to_string(),
        ));
    }

    let endpoints = [
        ("pricing", config.pricing.endpoint.as_str(), &config.pricing.client),
        (
            "reconciliation",
            config.reconciliation.endpoint.as_str(),
            &config.reconciliation.client,
        ),
        ("orders", config.orders.endpoint.as_str(), &config.orders.client),
        ("company", config.company.endpoint.as_str(), &config.company.client),
        ("catalog", config.catalog.endpoint.as_str(), &config.catalog.client),
        ("documents", "", &config.documents.client),
    ];

    for (section, endpoint, client) in endpoints {
        if !endpoint.is_empty() && !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "{section}.endpoint must be an http(s) URL"
            )));
        }
        if client.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}.client.timeout_secs must be positive"
            )));
        }
        if client.retry.max_attempts == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}.client.retry.max_attempts must be at least 1"
            )));
        }
        if client.retry.multiplier < 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}.client.retry.multiplier must be at least 1.0"
            )));
        }
    }

    let region = &config.documents.region;
    if region.width <= 0.0 || region.height <= 0.0 || region.font_size <= 0.0 {
        return Err(ConfigError::ValidationError(
            "documents.region width, height and font_size must be positive".to_string(),
        ));
    }

    Ok(())
}
