//! Logging and trace export settings.

use serde::{Deserialize, Serialize};

/// Log output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable lines.
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Export spans over OTLP.
    #[serde(default)]
    pub otlp_enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level applied to this service and the HTTP middleware.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let level = self.level.trim().to_lowercase();
        format!("pricing_engine={level},tower_http={level},warn")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_at_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter_directive(), "pricing_engine=info,tower_http=info,warn");
    }

    #[test]
    fn format_parses_lowercase() {
        let config: LoggingConfig =
            serde_yaml_bw::from_str("level: DEBUG\nformat: pretty\n").unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.filter_directive(), "pricing_engine=debug,tower_http=debug,warn");
    }
}
