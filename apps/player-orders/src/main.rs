//! Player Orders Binary
//!
//! Starts the player orders HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin player-orders
//! ```
//!
//! # Environment Variables
//!
//! - `PLAYER_ORDERS_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `RUST_LOG`: Overrides the configured log level
//!
//! Any `${VAR}` or `${VAR:-default}` reference inside the config file is
//! resolved from the environment, after `.env` has been loaded.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use player_orders::config::{Config, load_config};
use player_orders::infrastructure::config::Container;
use player_orders::infrastructure::http::{AppState, create_router};
use player_orders::observability::{MetricsConfig, init_logging, init_metrics};
use tokio::net::TcpListener;
use tokio::signal;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var("PLAYER_ORDERS_CONFIG").ok();
    let config = load_config(config_path.as_deref())
        .with_context(|| format!("loading {}", config_path.as_deref().unwrap_or("config.yaml")))?;

    init_logging(
        &config.observability.logging.level,
        config.observability.logging.format,
    )?;
    tracing::info!("Starting Player Orders service");
    log_config(&config);

    if config.observability.metrics.enabled {
        let addr: SocketAddr = config
            .observability
            .metrics
            .listen_address
            .parse()
            .context("parsing metrics listen address")?;
        init_metrics(&MetricsConfig::with_addr(addr))?;
    }

    let container = Container::from_config(&config).context("wiring services")?;
    let state = AppState {
        service: container.service(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let http_addr = config.server.listen_address();
    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET   /health");
    tracing::info!("  GET   /api/v1/player-orders/templates");
    tracing::info!("  POST  /api/v1/player-orders");
    tracing::info!("  GET   /api/v1/player-orders?status=");
    tracing::info!("  GET   /api/v1/player-orders/{{id}}");
    tracing::info!("  PATCH /api/v1/player-orders/{{id}}/brief");
    tracing::info!("  PUT   /api/v1/player-orders/{{id}}/budget");
    tracing::info!("  PUT   /api/v1/player-orders/{{id}}/guarantees");
    tracing::info!("  POST  /api/v1/player-orders/{{id}}/validate|publish|cancel|complete");

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("binding {http_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Player Orders service stopped");
    Ok(())
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        currency = %config.budget.currency,
        source_timeout_ms = config.validation.source_timeout_ms,
        static_sources = config.validation.allow_static_sources,
        metrics_enabled = config.observability.metrics.enabled,
        "Configuration loaded"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
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

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
