//! Validation Aggregator
//!
//! Fans a draft snapshot out to all six validation sources concurrently,
//! waits for every source to settle and folds the answers into one
//! [`ValidationSummary`].
//!
//! A source that times out, errors, panics or has no validator contributes a
//! single `SOURCE_UNAVAILABLE` error instead of its issues. Issues a source
//! raises under another source's name, or under the reserved code, are
//! discarded. Cancelling the token aborts every in-flight call and discards
//! partial results.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::DomainValidatorPort;
use crate::domain::order_validation::{
    SourceOutcome, SourceStatus, ValidationIssue, ValidationRequest, ValidationSource,
    ValidationSummary,
};
use crate::domain::shared::Timestamp;
use crate::observability;

/// Default per-source timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(3);

/// The validation pass was cancelled before every source settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("validation aborted before all sources settled")]
pub struct ValidationAborted;

/// How one source settled, before conversion into an outcome.
#[derive(Debug)]
struct SourceReport {
    status: SourceStatus,
    issues: Vec<ValidationIssue>,
    latency: Duration,
}

/// Concurrent fan-out over the configured domain validators.
pub struct ValidationAggregator {
    validators: HashMap<ValidationSource, Arc<dyn DomainValidatorPort>>,
    timeouts: HashMap<ValidationSource, Duration>,
    default_timeout: Duration,
}

impl ValidationAggregator {
    /// Create an aggregator with no validators and the given default timeout.
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            validators: HashMap::new(),
            timeouts: HashMap::new(),
            default_timeout,
        }
    }

    /// Register the validator for its source, replacing any previous one.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn DomainValidatorPort>) -> Self {
        self.validators.insert(validator.source(), validator);
        self
    }

    /// Override the timeout of one source.
    #[must_use]
    pub fn with_timeout(mut self, source: ValidationSource, timeout: Duration) -> Self {
        self.timeouts.insert(source, timeout);
        self
    }

    /// Timeout applied to `source`.
    #[must_use]
    pub fn timeout_for(&self, source: ValidationSource) -> Duration {
        self.timeouts
            .get(&source)
            .copied()
            .unwrap_or(self.default_timeout)
    }

    /// Sources with a registered validator.
    pub fn configured_sources(&self) -> impl Iterator<Item = ValidationSource> + '_ {
        self.validators.keys().copied()
    }

    /// Run one validation pass.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationAborted`] if `cancel` fires before every source settles.
    pub async fn validate(
        &self,
        request: ValidationRequest,
        cancel: &CancellationToken,
    ) -> Result<ValidationSummary, ValidationAborted> {
        if cancel.is_cancelled() {
            observability::record_validation_aborted();
            return Err(ValidationAborted);
        }

        let started = Instant::now();
        let request = Arc::new(request);
        let order_id = request.order_id.clone();

        let mut pending: Vec<(ValidationSource, JoinHandle<SourceReport>)> = Vec::new();
        let mut reports: BTreeMap<ValidationSource, SourceReport> = BTreeMap::new();

        for source in ValidationSource::ALL {
            let Some(validator) = self.validators.get(&source).cloned() else {
                tracing::warn!(order_id = %order_id, source = %source, "No validator configured");
                reports.insert(
                    source,
                    SourceReport {
                        status: SourceStatus::NotConfigured,
                        issues: vec![ValidationIssue::source_unavailable(
                            source,
                            "no validator is configured",
                        )],
                        latency: Duration::ZERO,
                    },
                );
                continue;
            };
            let timeout = self.timeout_for(source);
            let request = Arc::clone(&request);
            pending.push((
                source,
                tokio::spawn(async move { call_source(validator, source, timeout, request).await }),
            ));
        }

        let abort_handles: Vec<_> = pending.iter().map(|(_, h)| h.abort_handle()).collect();
        let (sources, handles): (Vec<_>, Vec<_>) = pending.into_iter().unzip();

        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                for handle in abort_handles {
                    handle.abort();
                }
                tracing::info!(order_id = %order_id, "Validation aborted");
                observability::record_validation_aborted();
                return Err(ValidationAborted);
            }
            joined = join_all(handles) => joined,
        };

        for (source, result) in sources.into_iter().zip(joined) {
            let report = result.unwrap_or_else(|join_error| {
                tracing::error!(
                    order_id = %order_id,
                    source = %source,
                    error = %join_error,
                    "Validator task failed"
                );
                SourceReport {
                    status: SourceStatus::Failed,
                    issues: vec![ValidationIssue::source_unavailable(
                        source,
                        "the validator crashed",
                    )],
                    latency: started.elapsed(),
                }
            });
            reports.insert(source, report);
        }

        let mut issues = Vec::new();
        let mut outcomes = BTreeMap::new();
        for (source, report) in reports {
            observability::record_validation_source(
                source.as_str(),
                status_label(report.status),
                report.latency.as_secs_f64(),
            );
            outcomes.insert(
                source,
                SourceOutcome {
                    status: report.status,
                    latency_ms: u64::try_from(report.latency.as_millis()).unwrap_or(u64::MAX),
                    issue_count: report.issues.len(),
                },
            );
            issues.extend(report.issues);
        }

        let summary = ValidationSummary::from_issues(issues, outcomes, Timestamp::now());
        let result = if summary.passed() { "passed" } else { "failed" };
        observability::record_validation_pass(result, started.elapsed().as_secs_f64());
        tracing::info!(
            order_id = %order_id,
            result,
            issues = summary.checklist.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Validation pass settled"
        );
        Ok(summary)
    }
}

async fn call_source(
    validator: Arc<dyn DomainValidatorPort>,
    source: ValidationSource,
    timeout: Duration,
    request: Arc<ValidationRequest>,
) -> SourceReport {
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, validator.validate(&request)).await;
    let latency = started.elapsed();

    match outcome {
        Ok(Ok(issues)) => SourceReport {
            status: SourceStatus::Responded,
            issues: retain_own_issues(source, issues),
            latency,
        },
        Ok(Err(error)) => {
            tracing::warn!(
                order_id = %request.order_id,
                source = %source,
                error = %error,
                "Validator returned an error"
            );
            SourceReport {
                status: SourceStatus::Failed,
                issues: vec![ValidationIssue::source_unavailable(source, error)],
                latency,
            }
        }
        Err(_) => {
            tracing::warn!(
                order_id = %request.order_id,
                source = %source,
                timeout_ms = timeout.as_millis() as u64,
                "Validator timed out"
            );
            SourceReport {
                status: SourceStatus::TimedOut,
                issues: vec![ValidationIssue::source_unavailable(
                    source,
                    format!("no answer within {} ms", timeout.as_millis()),
                )],
                latency,
            }
        }
    }
}

fn retain_own_issues(source: ValidationSource, issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
    issues
        .into_iter()
        .filter(|issue| {
            let own = issue.source == source && !issue.is_source_unavailable();
            if !own {
                tracing::warn!(
                    source = %source,
                    claimed_source = %issue.source,
                    code = %issue.code,
                    "Discarding issue the source may not raise"
                );
                observability::record_issue_discarded(source.as_str());
            }
            own
        })
        .collect()
}

const fn status_label(status: SourceStatus) -> &'static str {
    match status {
        SourceStatus::Responded => "responded",
        SourceStatus::TimedOut => "timed_out",
        SourceStatus::Failed => "failed",
        SourceStatus::NotConfigured => "not_configured",
    }
}
