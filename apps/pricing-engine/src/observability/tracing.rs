//! Log and span output for the pricing engine.
//!
//! One subscriber is installed per process: an `EnvFilter`, a `fmt` layer in
//! the configured format and, when export is enabled, an OpenTelemetry layer
//! shipping spans over OTLP/gRPC.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchConfigBuilder, BatchSpanProcessor, SdkTracerProvider};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, ObservabilityConfig};

const DEFAULT_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "pricing-engine";

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP collector.
    pub otlp_endpoint: String,
    /// `service.name` resource attribute.
    pub service_name: String,
    /// `service.version` resource attribute.
    pub service_version: String,
    /// Spans per export batch.
    pub export_batch_size: usize,
    /// Delay between batch exports.
    pub export_interval: Duration,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Console encoding.
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: DEFAULT_ENDPOINT.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            export_batch_size: 512,
            export_interval: Duration::from_secs(5),
            default_filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Settings from the config file, with `OTEL_EXPORTER_OTLP_ENDPOINT` and
    /// `OTEL_SERVICE_NAME` taking precedence for the exporter.
    #[must_use]
    pub fn from_observability(config: &ObservabilityConfig) -> Self {
        let env = |key: &str, default: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            otlp_endpoint: env("OTEL_EXPORTER_OTLP_ENDPOINT", DEFAULT_ENDPOINT),
            service_name: env("OTEL_SERVICE_NAME", DEFAULT_SERVICE_NAME),
            default_filter: config.logging.filter_directive(),
            format: config.logging.format,
            ..Self::default()
        }
    }
}

/// Error type for subscriber setup.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The OTLP exporter could not be built.
    #[error("failed to create OTLP exporter: {0}")]
    Exporter(String),
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

/// Flushes exported spans on shutdown.
pub struct TelemetryGuard {
    provider: SdkTracerProvider,
}

impl TelemetryGuard {
    /// Flush pending spans and stop the exporter.
    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::error!(error = %e, "Failed to shut down tracer provider");
        }
    }
}

fn tracer_provider(config: &TracingConfig) -> Result<SdkTracerProvider, TracingError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
        .map_err(|e| TracingError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", config.service_name.clone()),
            KeyValue::new("service.version", config.service_version.clone()),
        ])
        .build();

    let processor = BatchSpanProcessor::builder(exporter)
        .with_batch_config(
            BatchConfigBuilder::default()
                .with_max_export_batch_size(config.export_batch_size)
                .with_scheduled_delay(config.export_interval)
                .build(),
        )
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_span_processor(processor)
        .build())
}

/// Install the global subscriber.
///
/// With `export` set, spans also go to the OTLP collector and the returned
/// guard must be shut down before exit.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built (nothing is installed in
/// that case) or a global subscriber already exists.
pub fn init_telemetry(
    config: &TracingConfig,
    export: bool,
) -> Result<Option<TelemetryGuard>, TracingError> {
    let provider = export.then(|| tracer_provider(config)).transpose()?;
    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(config.service_name.clone())));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let json_layer =
        (config.format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json());
    let pretty_layer =
        (config.format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|e| TracingError::Subscriber(e.to_string()))?;

    if export {
        tracing::info!(
            endpoint = %config.otlp_endpoint,
            service = %config.service_name,
            "OpenTelemetry export enabled"
        );
    }

    Ok(provider.map(|provider| TelemetryGuard { provider }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    #[test]
    fn default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.service_name, "pricing-engine");
        assert_eq!(config.export_batch_size, 512);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn filter_and_format_follow_logging_section() {
        let observability = ObservabilityConfig {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
            otlp_enabled: false,
        };

        let config = TracingConfig::from_observability(&observability);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.default_filter.starts_with("pricing_engine=debug"));
        assert!(!config.otlp_endpoint.is_empty());
    }
}
