//! Domain Validator Port (Driven Port)
//!
//! One implementation per validation source. The aggregator calls every
//! configured validator concurrently and merges their issues.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::order_validation::{ValidationIssue, ValidationRequest, ValidationSource};

/// Port for a domain that owns validation rules.
#[async_trait]
pub trait DomainValidatorPort: Send + Sync {
    /// Source this validator speaks for.
    fn source(&self) -> ValidationSource;

    /// Judge a draft snapshot. Issues tagged with another source are discarded
    /// by the caller.
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<Vec<ValidationIssue>, UpstreamError>;
}
