//! Domain events for player orders.
//!
//! Every status transition and every edit emits one event. Events are drained
//! from the aggregate after it is saved and handed to the event publisher.

use serde::Serialize;

use super::value_objects::PlayerOrderStatus;
use crate::domain::order_guarantee::{EscrowPolicy, GuaranteeRule, InsuranceTier};
use crate::domain::order_validation::ValidationResult;
use crate::domain::shared::{Money, OrderId, Timestamp};

/// All player order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Draft created.
    DraftCreated {
        /// Order ID.
        order_id: OrderId,
        /// Initial title.
        title: String,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Brief edited.
    BriefUpdated {
        /// Order ID.
        order_id: OrderId,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Budget recomputed from new factors.
    BudgetUpdated {
        /// Order ID.
        order_id: OrderId,
        /// New estimate.
        estimate: Money,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Guarantees accepted.
    GuaranteesSelected {
        /// Order ID.
        order_id: OrderId,
        /// Escrow policy.
        escrow_policy: EscrowPolicy,
        /// Insurance tier.
        insurance_tier: InsuranceTier,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Guarantees dropped because a refreshed risk profile no longer allows them.
    GuaranteesInvalidated {
        /// Order ID.
        order_id: OrderId,
        /// Rule the old guarantees now violate.
        rule: String,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Validation pass started.
    ValidationStarted {
        /// Order ID.
        order_id: OrderId,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Validation pass settled.
    ValidationCompleted {
        /// Order ID.
        order_id: OrderId,
        /// Verdict.
        result: ValidationResult,
        /// Number of checklist entries.
        issue_count: usize,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Validation pass aborted before settling.
    ValidationAborted {
        /// Order ID.
        order_id: OrderId,
        /// Status restored.
        restored_status: PlayerOrderStatus,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Order returned to draft, discarding its validation.
    RevertedToDraft {
        /// Order ID.
        order_id: OrderId,
        /// Status before the revert.
        from: PlayerOrderStatus,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Order published.
    Published {
        /// Order ID.
        order_id: OrderId,
        /// Published reward.
        reward: Money,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Order completed.
    Completed {
        /// Order ID.
        order_id: OrderId,
        /// Event time.
        occurred_at: Timestamp,
    },
    /// Order cancelled.
    Cancelled {
        /// Order ID.
        order_id: OrderId,
        /// Status at cancellation.
        from: PlayerOrderStatus,
        /// Free-text reason.
        reason: String,
        /// Event time.
        occurred_at: Timestamp,
    },
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::DraftCreated { order_id, .. }
            | Self::BriefUpdated { order_id, .. }
            | Self::BudgetUpdated { order_id, .. }
            | Self::GuaranteesSelected { order_id, .. }
            | Self::GuaranteesInvalidated { order_id, .. }
            | Self::ValidationStarted { order_id, .. }
            | Self::ValidationCompleted { order_id, .. }
            | Self::ValidationAborted { order_id, .. }
            | Self::RevertedToDraft { order_id, .. }
            | Self::Published { order_id, .. }
            | Self::Completed { order_id, .. }
            | Self::Cancelled { order_id, .. } => order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::DraftCreated { occurred_at, .. }
            | Self::BriefUpdated { occurred_at, .. }
            | Self::BudgetUpdated { occurred_at, .. }
            | Self::GuaranteesSelected { occurred_at, .. }
            | Self::GuaranteesInvalidated { occurred_at, .. }
            | Self::ValidationStarted { occurred_at, .. }
            | Self::ValidationCompleted { occurred_at, .. }
            | Self::ValidationAborted { occurred_at, .. }
            | Self::RevertedToDraft { occurred_at, .. }
            | Self::Published { occurred_at, .. }
            | Self::Completed { occurred_at, .. }
            | Self::Cancelled { occurred_at, .. } => *occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::DraftCreated { .. } => "DRAFT_CREATED",
            Self::BriefUpdated { .. } => "BRIEF_UPDATED",
            Self::BudgetUpdated { .. } => "BUDGET_UPDATED",
            Self::GuaranteesSelected { .. } => "GUARANTEES_SELECTED",
            Self::GuaranteesInvalidated { .. } => "GUARANTEES_INVALIDATED",
            Self::ValidationStarted { .. } => "VALIDATION_STARTED",
            Self::ValidationCompleted { .. } => "VALIDATION_COMPLETED",
            Self::ValidationAborted { .. } => "VALIDATION_ABORTED",
            Self::RevertedToDraft { .. } => "REVERTED_TO_DRAFT",
            Self::Published { .. } => "PUBLISHED",
            Self::Completed { .. } => "COMPLETED",
            Self::Cancelled { .. } => "CANCELLED",
        }
    }

    pub(crate) fn guarantees_invalidated(order_id: OrderId, rule: GuaranteeRule) -> Self {
        Self::GuaranteesInvalidated {
            order_id,
            rule: rule.code().to_string(),
            occurred_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = OrderEvent::BriefUpdated {
            order_id: OrderId::new("po-1"),
            occurred_at: Timestamp::parse("2077-01-01T00:00:00Z").unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "BRIEF_UPDATED");
        assert_eq!(json["order_id"], "po-1");
        assert_eq!(event.event_type(), "BRIEF_UPDATED");
    }

    #[test]
    fn accessors_cover_struct_variants() {
        let at = Timestamp::now();
        let event = OrderEvent::Cancelled {
            order_id: OrderId::new("po-2"),
            from: PlayerOrderStatus::Draft,
            reason: "changed my mind".into(),
            occurred_at: at,
        };
        assert_eq!(event.order_id().as_str(), "po-2");
        assert_eq!(event.occurred_at(), at);
    }

    #[test]
    fn invalidation_event_carries_rule_code() {
        let event =
            OrderEvent::guarantees_invalidated(OrderId::new("po-3"), GuaranteeRule::ExtremeNeedsInsurance);
        assert!(matches!(
            event,
            OrderEvent::GuaranteesInvalidated { ref rule, .. } if rule == "EXTREME_REQUIRES_INSURANCE"
        ));
    }
}
