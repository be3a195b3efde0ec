//! Outbound HTTP client settings shared by every remote integration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout and retry policy for one remote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry policy.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl ClientSettings {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bounded exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First backoff in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
        }
    }
}

pub(crate) const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    100
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}
