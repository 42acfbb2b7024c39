//! Errors shared by ports that reach upstream services.

/// Failure talking to an upstream collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// Service could not be reached.
    #[error("{service} unavailable: {message}")]
    Unavailable {
        /// Upstream service name.
        service: String,
        /// Error message.
        message: String,
    },

    /// Service answered with something we cannot use.
    #[error("{service} returned an invalid response: {message}")]
    InvalidResponse {
        /// Upstream service name.
        service: String,
        /// Error message.
        message: String,
    },
}

impl UpstreamError {
    /// Build an `Unavailable` error.
    pub fn unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Build an `InvalidResponse` error.
    pub fn invalid_response(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service: service.into(),
            message: message.into(),
        }
    }
}
