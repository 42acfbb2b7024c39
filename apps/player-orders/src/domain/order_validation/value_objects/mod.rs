//! Validation value objects.

mod validation_issue;
mod validation_request;
mod validation_summary;

pub use validation_issue::{IssueSeverity, SOURCE_UNAVAILABLE, ValidationIssue, ValidationSource};
pub use validation_request::ValidationRequest;
pub use validation_summary::{SourceOutcome, SourceStatus, ValidationResult, ValidationSummary};
