//! Order State Machine Service
//!
//! Validates player order status transitions.

use crate::domain::player_order::errors::PlayerOrderError;
use crate::domain::player_order::value_objects::PlayerOrderStatus;

/// State machine for player order transitions.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: PlayerOrderStatus, to: PlayerOrderStatus) -> bool {
        use PlayerOrderStatus::{
            Cancelled, Completed, Draft, Published, Rejected, Validated, Validating,
        };
        matches!(
            (from, to),
            (Draft, Validating)
                | (Draft, Cancelled)
                // Validation settles, or is aborted back to where it started
                | (Validating, Validated)
                | (Validating, Rejected)
                | (Validating, Draft)
                | (Validating, Cancelled)
                | (Validated, Validating)
                | (Validated, Published)
                | (Validated, Draft)
                | (Validated, Cancelled)
                | (Rejected, Draft)
                | (Rejected, Cancelled)
                | (Published, Completed)
                | (Published, Cancelled)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns `OrderClosed` from terminal states, `InvalidStateTransition` otherwise.
    pub fn validate_transition(
        from: PlayerOrderStatus,
        to: PlayerOrderStatus,
    ) -> Result<(), PlayerOrderError> {
        if Self::is_valid_transition(from, to) {
            return Ok(());
        }
        if from.is_terminal() {
            return Err(PlayerOrderError::OrderClosed { status: from });
        }
        Err(PlayerOrderError::InvalidStateTransition {
            from,
            to,
            reason: Self::transition_error_reason(from, to),
        })
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: PlayerOrderStatus, to: PlayerOrderStatus) -> String {
        match from {
            PlayerOrderStatus::Published => {
                format!("Published orders cannot move to {to}; cancel or complete them instead")
            }
            PlayerOrderStatus::Validating => {
                format!("Validation is in progress, cannot transition to {to}")
            }
            PlayerOrderStatus::Rejected => {
                format!("Rejected orders must return to draft before moving to {to}")
            }
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: PlayerOrderStatus) -> Vec<PlayerOrderStatus> {
        use PlayerOrderStatus::{
            Cancelled, Completed, Draft, Published, Rejected, Validated, Validating,
        };
        match from {
            Draft => vec![Validating, Cancelled],
            Validating => vec![Validated, Rejected, Draft, Cancelled],
            Validated => vec![Validating, Published, Draft, Cancelled],
            Rejected => vec![Draft, Cancelled],
            Published => vec![Completed, Cancelled],
            Completed | Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlayerOrderStatus::{Cancelled, Completed, Draft, Published, Rejected, Validated, Validating};

    const ALL: [PlayerOrderStatus; 7] = [
        Draft, Validating, Validated, Rejected, Published, Completed, Cancelled,
    ];

    #[test]
    fn happy_path_is_valid() {
        for (from, to) in [
            (Draft, Validating),
            (Validating, Validated),
            (Validated, Published),
            (Published, Completed),
        ] {
            assert!(OrderStateMachine::is_valid_transition(from, to), "{from} -> {to}");
        }
    }

    #[test]
    fn draft_cannot_publish() {
        assert!(!OrderStateMachine::is_valid_transition(Draft, Published));
        assert!(!OrderStateMachine::is_valid_transition(Rejected, Published));
    }

    #[test]
    fn rejected_cannot_validate_directly() {
        assert!(!OrderStateMachine::is_valid_transition(Rejected, Validating));
    }

    #[test]
    fn every_non_terminal_state_can_cancel() {
        for status in ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(OrderStateMachine::is_valid_transition(status, Cancelled));
        }
    }

    #[test]
    fn terminal_states_report_order_closed() {
        for from in [Completed, Cancelled] {
            assert!(OrderStateMachine::valid_next_states(from).is_empty());
            let err = OrderStateMachine::validate_transition(from, Draft).unwrap_err();
            assert!(matches!(err, PlayerOrderError::OrderClosed { .. }));
        }
    }

    #[test]
    fn next_states_agree_with_is_valid_transition() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    OrderStateMachine::valid_next_states(from).contains(&to),
                    OrderStateMachine::is_valid_transition(from, to),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn published_edit_reason_mentions_cancel() {
        let err = OrderStateMachine::validate_transition(Published, Draft).unwrap_err();
        assert!(err.to_string().contains("cancel or complete"));
    }
}
