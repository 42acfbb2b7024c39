//! Order Validation Bounded Context
//!
//! Issues, checklists and verdicts for the cross-domain validation pass,
//! plus the social domain's own rules.

pub mod services;
pub mod value_objects;

pub use services::SocialRules;
pub use value_objects::{
    IssueSeverity, SOURCE_UNAVAILABLE, SourceOutcome, SourceStatus, ValidationIssue,
    ValidationRequest, ValidationResult, ValidationSource, ValidationSummary,
};
