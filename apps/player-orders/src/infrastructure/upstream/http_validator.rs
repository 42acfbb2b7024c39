//! HTTP domain validator.
//!
//! POSTs the draft snapshot as JSON to a domain service and reads back
//! `{"issues": [...]}`. Timeouts are enforced by the aggregator; the client
//! timeout here is only a backstop for stuck connections.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{DomainValidatorPort, UpstreamError};
use crate::domain::order_validation::{ValidationIssue, ValidationRequest, ValidationSource};

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    issues: Vec<ValidationIssue>,
}

/// Validator backed by a domain service's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpDomainValidator {
    client: Client,
    source: ValidationSource,
    endpoint: String,
}

impl HttpDomainValidator {
    /// Create a validator for `source` posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(
        source: ValidationSource,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::unavailable(source.as_str(), e.to_string()))?;
        Ok(Self {
            client,
            source,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint the validator posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DomainValidatorPort for HttpDomainValidator {
    fn source(&self) -> ValidationSource {
        self.source
    }

    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<Vec<ValidationIssue>, UpstreamError> {
        let service = self.source.as_str();
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::unavailable(service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::unavailable(
                service,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body: ValidationResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::invalid_response(service, e.to_string()))?;
        tracing::debug!(
            order_id = %request.order_id,
            source = %self.source,
            issues = body.issues.len(),
            "Domain validator answered"
        );
        Ok(body.issues)
    }
}
