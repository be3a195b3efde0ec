//! Remote client configuration.

use std::time::Duration;

use crate::config::{ClientSettings, RetrySettings};

/// Configuration for one remote HTTP endpoint client.
#[derive(Debug, Clone)]
pub struct WebhookClientConfig {
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl Default for WebhookClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

impl WebhookClientConfig {
    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl From<&ClientSettings> for WebhookClientConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            retry: RetryConfig::from(&settings.retry),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A single attempt with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
            multiplier: settings.multiplier,
        }
    }
}
