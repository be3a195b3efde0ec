//! Observability module for metrics and tracing.

mod metrics;
mod tracing;

pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_cache_lookup, record_document_rewrite,
    record_price_resolution, record_reconciliation, record_settle_delay, record_unmatched_items,
};
pub use self::tracing::{TelemetryGuard, TracingConfig, TracingError, init_telemetry};
