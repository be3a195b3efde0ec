//! Prometheus metrics for the pricing engine.
//!
//! Counters for price resolution outcomes and cache behaviour, cart
//! reconciliation and document rewrites; a histogram for settling delays.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for settling delays (in seconds).
    pub settle_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // 0s to 2 minutes
            settle_buckets: vec![0.0, 2.0, 4.0, 6.0, 10.0, 20.0, 30.0, 60.0, 120.0],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.settle_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Pricing Metrics
// ============================================================================

/// Record a price cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("price_cache_lookups_total", "result" => result).increment(1);
}

/// Record how a price was resolved.
///
/// # Arguments
///
/// * `source` - `"remote"` or `"fallback"`
/// * `reason` - Why (e.g., `"valid"`, `"invalid"`, `"unavailable"`, `"not_privileged"`)
pub fn record_price_resolution(source: &str, reason: &str) {
    counter!(
        "price_resolutions_total",
        "source" => source.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Cart Reconciliation Metrics
// ============================================================================

/// Record a price-sync batch post.
///
/// # Arguments
///
/// * `status` - `"accepted"` or `"failed"`
pub fn record_reconciliation(status: &str) {
    counter!("cart_reconciliations_total", "status" => status.to_string()).increment(1);
}

/// Record logical items that matched no cart line.
pub fn record_unmatched_items(count: usize) {
    if count > 0 {
        counter!("cart_unmatched_items_total").increment(u64::try_from(count).unwrap_or(u64::MAX));
    }
}

/// Record the settling wait after a successful reconciliation.
pub fn record_settle_delay(delay: Duration) {
    histogram!("cart_settle_delay_seconds").record(delay.as_secs_f64());
}

// ============================================================================
// Document Metrics
// ============================================================================

/// Record a document rewrite.
///
/// # Arguments
///
/// * `format` - Document format (e.g., `"pdf"`, `"html"`)
/// * `outcome` - `"rewritten"`, `"passthrough"` or `"failed"`
pub fn record_document_rewrite(format: &str, outcome: &str) {
    counter!(
        "document_rewrites_total",
        "format" => format.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_listens_on_9090() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(config.settle_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_cache_lookup(true);
        record_price_resolution("fallback", "unavailable");
        record_reconciliation("accepted");
        record_unmatched_items(2);
        record_settle_delay(Duration::from_secs(4));
        record_document_rewrite("pdf", "rewritten");
    }

    #[test]
    fn error_display() {
        let err = MetricsError::Installation("address in use".to_string());
        assert!(err.to_string().contains("address in use"));
    }
}
