//! Budget input errors.

use std::fmt;

/// Errors raised while constructing budget factors.
///
/// The engine itself is infallible: everything that could make it misbehave
/// is rejected here, before a computation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactorError {
    /// An input lies outside its permitted range.
    InvalidFactorRange {
        /// Offending field path, e.g. `complexity_factors[1].weight`.
        field: String,
        /// What the permitted range is.
        message: String,
    },
}

impl FactorError {
    /// Build an `InvalidFactorRange` error.
    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFactorRange {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFactorRange { .. } => "INVALID_FACTOR_RANGE",
        }
    }

    /// Field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidFactorRange { field, .. } => field,
        }
    }
}

impl fmt::Display for FactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFactorRange { field, message } => {
                write!(f, "Invalid factor range for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for FactorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field() {
        let err = FactorError::out_of_range("risk_modifier", "must be within [0.5, 2.0]");
        let msg = err.to_string();
        assert!(msg.contains("risk_modifier"));
        assert!(msg.contains("[0.5, 2.0]"));
        assert_eq!(err.code(), "INVALID_FACTOR_RANGE");
        assert_eq!(err.field(), "risk_modifier");
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(FactorError::out_of_range("market_index", "negative"));
        assert!(!err.to_string().is_empty());
    }
}
