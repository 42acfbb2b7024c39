//! Prometheus metrics for the player orders service.
//!
//! Covers budget computations, the validation fan-out (per source and per
//! pass) and lifecycle transitions.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // Upstream validators answer in milliseconds to seconds
            latency_buckets: vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
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
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

// ============================================================================
// Budget Metrics
// ============================================================================

/// Record a budget computation.
///
/// * `floored` - whether penalties pushed the raw total below zero
pub fn record_budget_computation(floored: bool) {
    counter!(
        "player_order_budget_computations_total",
        "floored" => floored.to_string()
    )
    .increment(1);
}

// ============================================================================
// Validation Metrics
// ============================================================================

/// Record how one source settled during a validation pass.
///
/// * `source` - validation source (e.g. "economy", "world")
/// * `status` - settlement (e.g. "responded", "timed_out")
/// * `latency_seconds` - time until settlement
pub fn record_validation_source(source: &str, status: &str, latency_seconds: f64) {
    counter!(
        "player_order_validation_source_total",
        "source" => source.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "player_order_validation_source_latency_seconds",
        "source" => source.to_string()
    )
    .record(latency_seconds);
}

/// Record a settled validation pass.
pub fn record_validation_pass(result: &str, latency_seconds: f64) {
    counter!(
        "player_order_validations_total",
        "result" => result.to_string()
    )
    .increment(1);

    histogram!("player_order_validation_latency_seconds").record(latency_seconds);
}

/// Record a validation pass abandoned on cancellation.
pub fn record_validation_aborted() {
    counter!("player_order_validations_aborted_total").increment(1);
}

/// Record an issue discarded because the source was not allowed to raise it.
pub fn record_issue_discarded(source: &str) {
    counter!(
        "player_order_validation_issues_discarded_total",
        "source" => source.to_string()
    )
    .increment(1);
}

// ============================================================================
// Lifecycle Metrics
// ============================================================================

/// Record a lifecycle transition.
pub fn record_transition(from: &str, to: &str) {
    counter!(
        "player_order_transitions_total",
        "from" => from.to_string(),
        "to" => to.to_string()
    )
    .increment(1);
}

/// Update the active orders gauge.
pub fn update_active_orders(count: usize) {
    gauge!("player_orders_active").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(config.latency_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn with_addr_keeps_buckets() {
        let addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr, addr);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn recording_without_exporter_is_a_no_op() {
        record_budget_computation(false);
        record_validation_source("world", "timed_out", 3.0);
        record_validation_pass("failed", 3.1);
        record_validation_aborted();
        record_issue_discarded("economy");
        record_transition("draft", "validating");
        update_active_orders(3);
    }
}
