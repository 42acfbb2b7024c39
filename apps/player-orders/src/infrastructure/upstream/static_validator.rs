//! Fixed-answer validators for development and tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{DomainValidatorPort, UpstreamError};
use crate::domain::order_validation::{ValidationIssue, ValidationRequest, ValidationSource};

/// Validator that answers every request with the same issues.
#[derive(Debug, Clone)]
pub struct StaticDomainValidator {
    source: ValidationSource,
    issues: Vec<ValidationIssue>,
    delay: Option<Duration>,
    unavailable: bool,
}

impl StaticDomainValidator {
    /// Validator that raises nothing.
    #[must_use]
    pub const fn accept_all(source: ValidationSource) -> Self {
        Self {
            source,
            issues: Vec::new(),
            delay: None,
            unavailable: false,
        }
    }

    /// Validator that always fails with `Unavailable`.
    #[must_use]
    pub const fn unavailable(source: ValidationSource) -> Self {
        Self {
            source,
            issues: Vec::new(),
            delay: None,
            unavailable: true,
        }
    }

    /// Raise `issue` on every request.
    #[must_use]
    pub fn with_issue(mut self, issue: ValidationIssue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Sleep before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl DomainValidatorPort for StaticDomainValidator {
    fn source(&self) -> ValidationSource {
        self.source
    }

    async fn validate(
        &self,
        _request: &ValidationRequest,
    ) -> Result<Vec<ValidationIssue>, UpstreamError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(UpstreamError::unavailable(
                self.source.as_str(),
                "static validator configured as unavailable",
            ));
        }
        Ok(self.issues.clone())
    }
}
