//! Player order errors.

use std::fmt;

use super::value_objects::PlayerOrderStatus;
use crate::domain::order_guarantee::GuaranteeError;

/// Errors raised by the player order aggregate and its repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerOrderError {
    /// Transition not permitted from the current status.
    InvalidStateTransition {
        /// Current status.
        from: PlayerOrderStatus,
        /// Attempted status.
        to: PlayerOrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Publication attempted without a passed validation.
    NotValidated {
        /// Current status.
        status: PlayerOrderStatus,
    },

    /// The order is completed or cancelled.
    OrderClosed {
        /// Terminal status.
        status: PlayerOrderStatus,
    },

    /// Brief field failed validation.
    InvalidBrief {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Guarantee terms were rejected.
    Guarantee(GuaranteeError),

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Storage failure.
    Persistence {
        /// Error message.
        message: String,
    },
}

impl PlayerOrderError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::NotValidated { .. } => "NOT_VALIDATED",
            Self::OrderClosed { .. } => "ORDER_CLOSED",
            Self::InvalidBrief { .. } => "INVALID_BRIEF",
            Self::Guarantee(e) => e.code(),
            Self::NotFound { .. } => "ORDER_NOT_FOUND",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }

    /// Suggested fix, when one exists.
    #[must_use]
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::NotValidated { .. } => Some("Run validation and resolve every blocking issue"),
            Self::OrderClosed { .. } => Some("Create a new draft"),
            Self::Guarantee(e) => e.remediation(),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Invalid order state transition: {from} -> {to}: {reason}")
            }
            Self::NotValidated { status } => {
                write!(f, "Order has not passed validation (status: {status})")
            }
            Self::OrderClosed { status } => write!(f, "Order is closed (status: {status})"),
            Self::InvalidBrief { field, message } => {
                write!(f, "Invalid brief field '{field}': {message}")
            }
            Self::Guarantee(e) => write!(f, "{e}"),
            Self::NotFound { order_id } => write!(f, "Order not found: {order_id}"),
            Self::Persistence { message } => write!(f, "Persistence error: {message}"),
        }
    }
}

impl std::error::Error for PlayerOrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Guarantee(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GuaranteeError> for PlayerOrderError {
    fn from(err: GuaranteeError) -> Self {
        Self::Guarantee(err)
    }
}
