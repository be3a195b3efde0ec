//! Cart price reconciliation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ClientSettings;

/// Cart price reconciliation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Price-synchronization webhook URL.
    #[serde(default)]
    pub endpoint: String,
    /// Storefront store hash sent with every batch.
    #[serde(default)]
    pub store_hash: String,
    /// Storefront API token sent with every batch.
    #[serde(default)]
    pub auth_token: String,
    /// Settling wait per synchronized line, in seconds.
    #[serde(default = "default_settle_secs_per_item")]
    pub settle_secs_per_item: u64,
    /// Upper bound on the settling wait, in seconds.
    #[serde(default)]
    pub max_settle_secs: Option<u64>,
    /// Client timeout and retry policy.
    #[serde(default)]
    pub client: ClientSettings,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            store_hash: String::new(),
            auth_token: String::new(),
            settle_secs_per_item: default_settle_secs_per_item(),
            max_settle_secs: None,
            client: ClientSettings::default(),
        }
    }
}

impl ReconciliationConfig {
    /// Settling wait per line.
    #[must_use]
    pub const fn settle_per_item(&self) -> Duration {
        Duration::from_secs(self.settle_secs_per_item)
    }

    /// Settling wait cap.
    #[must_use]
    pub fn max_settle(&self) -> Option<Duration> {
        self.max_settle_secs.map(Duration::from_secs)
    }
}

const fn default_settle_secs_per_item() -> u64 {
    2
}
