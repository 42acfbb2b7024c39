//! Local social rules exposed as the `social` validation source.

use async_trait::async_trait;

use crate::application::ports::{DomainValidatorPort, UpstreamError};
use crate::domain::order_validation::{
    SocialRules, ValidationIssue, ValidationRequest, ValidationSource,
};

/// Validator evaluating [`SocialRules`] in process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocialRulesValidator {
    rules: SocialRules,
}

impl SocialRulesValidator {
    /// Create the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: SocialRules }
    }
}

#[async_trait]
impl DomainValidatorPort for SocialRulesValidator {
    fn source(&self) -> ValidationSource {
        ValidationSource::Social
    }

    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<Vec<ValidationIssue>, UpstreamError> {
        Ok(self.rules.evaluate(request))
    }
}
