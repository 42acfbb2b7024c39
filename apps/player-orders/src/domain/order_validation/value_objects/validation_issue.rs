//! Validation issues raised by the owning domains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code reserved for issues synthesized when a source does not answer.
pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";

/// Domain that owns a set of validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    /// Local social rules.
    Social,
    /// Economy service.
    Economy,
    /// World service.
    World,
    /// Factions service.
    Factions,
    /// Content service.
    Content,
    /// Telemetry service.
    Telemetry,
}

impl ValidationSource {
    /// Every source, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Social,
        Self::Economy,
        Self::World,
        Self::Factions,
        Self::Content,
        Self::Telemetry,
    ];

    /// Wire name, also used for checklist ordering.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Economy => "economy",
            Self::World => "world",
            Self::Factions => "factions",
            Self::Content => "content",
            Self::Telemetry => "telemetry",
        }
    }
}

impl fmt::Display for ValidationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Sources order by name so checklists tie-break alphabetically.
impl Ord for ValidationSource {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ValidationSource {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Issue severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Informational.
    Info,
    /// Worth attention; does not block.
    Warning,
    /// Blocks publication.
    Error,
    /// Blocks publication and needs immediate attention.
    Critical,
}

impl IssueSeverity {
    /// Returns true for severities that fail validation.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from one validation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code (e.g. "TITLE_TOO_SHORT").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Severity.
    pub severity: IssueSeverity,
    /// Domain that raised the issue.
    pub source: ValidationSource,
    /// Offending field, if the issue concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// What the issuer should do about it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    #[must_use]
    pub fn new(
        source: ValidationSource,
        severity: IssueSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            source,
            field: None,
            remediation: None,
        }
    }

    /// Create an info-level issue.
    #[must_use]
    pub fn info(source: ValidationSource, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(source, IssueSeverity::Info, code, message)
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(
        source: ValidationSource,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(source, IssueSeverity::Warning, code, message)
    }

    /// Create an error-level issue.
    #[must_use]
    pub fn error(source: ValidationSource, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(source, IssueSeverity::Error, code, message)
    }

    /// Create a critical-level issue.
    #[must_use]
    pub fn critical(
        source: ValidationSource,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(source, IssueSeverity::Critical, code, message)
    }

    /// Issue standing in for a source that timed out, failed or is not configured.
    #[must_use]
    pub fn source_unavailable(source: ValidationSource, detail: impl fmt::Display) -> Self {
        Self::error(
            source,
            SOURCE_UNAVAILABLE,
            format!("The {source} service did not complete validation: {detail}"),
        )
        .with_remediation(format!(
            "Retry validation once the {source} service is reachable"
        ))
    }

    /// Add field context.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add a remediation hint.
    #[must_use]
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Returns true for the synthetic unavailability issue.
    #[must_use]
    pub fn is_source_unavailable(&self) -> bool {
        self.code == SOURCE_UNAVAILABLE
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}: {}", self.source, self.severity, self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered() {
        assert!(IssueSeverity::Info < IssueSeverity::Warning);
        assert!(IssueSeverity::Warning < IssueSeverity::Error);
        assert!(IssueSeverity::Error < IssueSeverity::Critical);
        assert!(!IssueSeverity::Warning.is_blocking());
        assert!(IssueSeverity::Error.is_blocking());
    }

    #[test]
    fn sources_order_by_name() {
        let mut sources = ValidationSource::ALL.to_vec();
        sources.sort();
        let names: Vec<_> = sources.iter().map(ValidationSource::as_str).collect();
        assert_eq!(
            names,
            ["content", "economy", "factions", "social", "telemetry", "world"]
        );
    }

    #[test]
    fn source_unavailable_is_error_with_remediation() {
        let issue = ValidationIssue::source_unavailable(ValidationSource::World, "timed out");
        assert_eq!(issue.severity, IssueSeverity::Error);
        assert_eq!(issue.source, ValidationSource::World);
        assert!(issue.is_source_unavailable());
        assert!(issue.remediation.unwrap().contains("world"));
    }

    #[test]
    fn display_includes_field() {
        let issue = ValidationIssue::error(ValidationSource::Social, "TITLE_TOO_SHORT", "short")
            .with_field("title");
        let text = issue.to_string();
        assert!(text.contains("social/error"));
        assert!(text.contains("field: title"));
    }

    #[test]
    fn deserializes_upstream_payload_without_optionals() {
        let issue: ValidationIssue = serde_json::from_str(
            r#"{"code":"ZONE_LOCKED","message":"zone locked","severity":"critical","source":"world"}"#,
        )
        .unwrap();
        assert_eq!(issue.severity, IssueSeverity::Critical);
        assert!(issue.field.is_none());
    }
}
