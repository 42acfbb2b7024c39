//! Observability module for metrics and structured logging.

mod logging;
mod metrics;

pub use logging::{LogFormat, LoggingError, build_filter, init_logging};
pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_budget_computation, record_issue_discarded,
    record_transition, record_validation_aborted, record_validation_pass, record_validation_source,
    update_active_orders,
};
