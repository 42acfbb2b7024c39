//! Aggregated validation verdict.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{IssueSeverity, ValidationIssue, ValidationSource};
use crate::domain::shared::Timestamp;

/// Overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResult {
    /// No issue at error severity or above.
    Passed,
    /// At least one blocking issue.
    Failed,
}

/// How a source settled during a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Answered in time.
    Responded,
    /// Exceeded its timeout.
    TimedOut,
    /// Returned an error or panicked.
    Failed,
    /// No validator is configured for the source.
    NotConfigured,
}

/// Per-source report attached to a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    /// Settlement.
    pub status: SourceStatus,
    /// Wall-clock time until settlement.
    pub latency_ms: u64,
    /// Issues the source contributed after filtering.
    pub issue_count: usize,
}

/// Result of one validation pass over a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Verdict.
    pub result: ValidationResult,
    /// All issues, most severe first, ties broken by source name.
    pub checklist: Vec<ValidationIssue>,
    /// When the pass completed.
    pub validated_at: Timestamp,
    /// Remediation of the most severe blocking issue that has one.
    pub next_required_action: Option<String>,
    /// How each source settled.
    pub source_outcomes: BTreeMap<ValidationSource, SourceOutcome>,
}

impl ValidationSummary {
    /// Build a summary, ordering the checklist and deriving the verdict.
    #[must_use]
    pub fn from_issues(
        mut issues: Vec<ValidationIssue>,
        source_outcomes: BTreeMap<ValidationSource, SourceOutcome>,
        validated_at: Timestamp,
    ) -> Self {
        // Stable: issues from the same source at the same severity keep arrival order.
        issues.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.source.cmp(&b.source)));

        let highest = issues.first().map(|issue| issue.severity);
        let failed = highest.is_some_and(|s| s.is_blocking());
        let next_required_action = highest
            .filter(IssueSeverity::is_blocking)
            .and_then(|top| {
                issues
                    .iter()
                    .take_while(|issue| issue.severity == top)
                    .find_map(|issue| issue.remediation.clone())
            });

        Self {
            result: if failed {
                ValidationResult::Failed
            } else {
                ValidationResult::Passed
            },
            checklist: issues,
            validated_at,
            next_required_action,
            source_outcomes,
        }
    }

    /// Returns true if the verdict is passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result == ValidationResult::Passed
    }

    /// Issues raised by one source.
    pub fn issues_from(&self, source: ValidationSource) -> impl Iterator<Item = &ValidationIssue> {
        self.checklist.iter().filter(move |issue| issue.source == source)
    }
}
