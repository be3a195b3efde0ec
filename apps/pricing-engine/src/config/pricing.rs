//! ERP pricing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::pricing::TaxDisplay;
use crate::domain::shared::DEFAULT_CURRENCY;

use super::ClientSettings;

/// ERP pricing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ERP pricing webhook URL.
    #[serde(default)]
    pub endpoint: String,
    /// Price cache TTL in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Store currency for catalog prices and remote prices without one.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Whether catalog prices are displayed with tax.
    #[serde(default)]
    pub tax_display: TaxDisplay,
    /// Client timeout and retry policy.
    #[serde(default)]
    pub client: ClientSettings,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_currency: default_currency(),
            tax_display: TaxDisplay::default(),
            client: ClientSettings::default(),
        }
    }
}

impl PricingConfig {
    /// Price cache TTL.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
