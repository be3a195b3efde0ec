//! Pricing Engine Binary
//!
//! Starts the pricing engine HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pricing-engine
//! ```
//!
//! # Environment Variables
//!
//! - `PRICING_ENGINE_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP collector (default: <http://localhost:4317>)
//! - `RUST_LOG`: Log filter (default: from `observability.logging.level`)
//! - `OTEL_SERVICE_NAME`: Exported service name (default: pricing-engine)
//!
//! Every value in the config file may reference `${VAR}` or `${VAR:-default}`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use pricing_engine::config::{Config, load_config};
use pricing_engine::infrastructure::config::ProductionContainer;
use pricing_engine::infrastructure::http::create_router;
use pricing_engine::observability::{
    MetricsConfig, TelemetryGuard, TracingConfig, init_metrics, init_telemetry,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var("PRICING_ENGINE_CONFIG").ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    let telemetry = init_logging(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting pricing engine");
    log_config(&config);

    let metrics_addr = socket_addr(&config.server.bind_address, config.server.metrics_port)?;
    if let Err(e) = init_metrics(&MetricsConfig::with_addr(metrics_addr)) {
        tracing::warn!(error = %e, "Metrics exporter not started, continuing without it");
    }

    let container =
        ProductionContainer::from_config(&config).context("failed to build HTTP clients")?;
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let http_addr = socket_addr(&config.server.bind_address, config.server.http_port)?;
    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  POST   /api/v1/prices/resolve");
    tracing::info!("  POST   /api/v1/prices/aggregate");
    tracing::info!("  DELETE /api/v1/prices/cache");
    tracing::info!("  POST   /api/v1/carts/{{cart_id}}/reconcile");
    tracing::info!("  GET    /api/v1/orders/{{order_id}}/external-id");
    tracing::info!("  POST   /api/v1/documents/rewrite");
    tracing::info!("  POST   /api/v1/documents/render");
    tracing::info!("  GET    /api/v1/users/{{user_id}}/pricing-context");
    tracing::info!("  GET    /api/v1/products/{{product_id}}/show-price");

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(shutdown_tx));
    let mut handle = tokio::spawn(async move {
        if let Err(e) = server.await {
            tracing::error!("HTTP server error: {e}");
        }
    });

    tokio::select! {
        _ = &mut handle => {}
        _ = shutdown_rx.recv() => {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
                tracing::warn!("Graceful shutdown timed out, forcing exit");
            }
        }
    }

    if let Some(guard) = telemetry {
        guard.shutdown();
    }
    tracing::info!("Pricing engine stopped");
    Ok(())
}

fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

fn otel_enabled(config: &Config) -> bool {
    config.observability.otlp_enabled
        || std::env::var("OTEL_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
}

/// Install the global subscriber, falling back to console-only output when
/// the OTLP exporter cannot be built.
fn init_logging(config: &Config) -> Option<TelemetryGuard> {
    let tracing_config = TracingConfig::from_observability(&config.observability);

    if otel_enabled(config) {
        match init_telemetry(&tracing_config, true) {
            Ok(guard) => return guard,
            Err(e) => eprintln!("OpenTelemetry disabled: {e}"),
        }
    }

    match init_telemetry(&tracing_config, false) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging not initialized: {e}");
            None
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        metrics_port = config.server.metrics_port,
        pricing_endpoint = %config.pricing.endpoint,
        cache_ttl_secs = config.pricing.cache_ttl_secs,
        settle_secs_per_item = config.reconciliation.settle_secs_per_item,
        company_lookup = config.company.is_enabled(),
        catalog_lookup = config.catalog.is_enabled(),
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    let _ = shutdown_tx.send(());
    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
