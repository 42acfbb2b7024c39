//! HTTP response DTOs and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::dto::PlayerOrderDto;
use crate::application::services::LifecycleError;
use crate::domain::order_validation::ValidationSummary;
use crate::domain::player_order::{PlayerOrderError, PlayerOrderStatus};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Orders matching a status query.
#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    /// Matching orders, oldest first.
    pub orders: Vec<PlayerOrderDto>,
}

/// Result of a validation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    /// Order ID.
    pub order_id: String,
    /// Status after the pass.
    pub status: PlayerOrderStatus,
    /// Summary.
    pub summary: ValidationSummary,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Suggested fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

/// Lifecycle error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LifecycleError);

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            LifecycleError::Order(e) => match e {
                PlayerOrderError::NotFound { .. } => StatusCode::NOT_FOUND,
                PlayerOrderError::InvalidStateTransition { .. }
                | PlayerOrderError::NotValidated { .. }
                | PlayerOrderError::OrderClosed { .. } => StatusCode::CONFLICT,
                PlayerOrderError::InvalidBrief { .. } | PlayerOrderError::Guarantee(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PlayerOrderError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            LifecycleError::Factor(_)
            | LifecycleError::Guarantee(_)
            | LifecycleError::TemplateNotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LifecycleError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LifecycleError::ValidationAborted(_) => StatusCode::CONFLICT,
            LifecycleError::TaskFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(e: LifecycleError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), error = %self.0, "Request failed");
        }
        let body = ErrorResponse {
            code: self.0.code().to_string(),
            message: self.0.to_string(),
            remediation: self.0.remediation().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::UpstreamError;
    use crate::domain::order_guarantee::{GuaranteeError, GuaranteeRule};

    #[test]
    fn status_codes_are_stable() {
        let cases = [
            (
                LifecycleError::Order(PlayerOrderError::NotFound {
                    order_id: "po-1".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                LifecycleError::Order(PlayerOrderError::NotValidated {
                    status: PlayerOrderStatus::Draft,
                }),
                StatusCode::CONFLICT,
            ),
            (
                LifecycleError::Guarantee(GuaranteeError::BelowRiskFloor {
                    rule: GuaranteeRule::ExtremeNeedsInsurance,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LifecycleError::Upstream(UpstreamError::unavailable("economy", "down")),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError(error).status(), expected);
        }
    }
}
