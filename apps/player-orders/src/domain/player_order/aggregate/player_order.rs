//! Player Order Aggregate Root
//!
//! Owns the draft's brief, budget, guarantees, cached risk profile and latest
//! validation, and enforces the lifecycle:
//!
//! - edits in `validated` or `rejected` revert the order to `draft`;
//! - guarantees always satisfy the selector against the cached risk profile;
//! - publication requires a passed latest validation.

use serde::Serialize;

use crate::domain::order_budget::{BudgetEstimate, BudgetFactors};
use crate::domain::order_guarantee::{
    GuaranteeQuote, GuaranteeSelection, GuaranteeSelector, RiskProfile,
};
use crate::domain::order_validation::{ValidationRequest, ValidationSummary};
use crate::domain::player_order::errors::PlayerOrderError;
use crate::domain::player_order::events::OrderEvent;
use crate::domain::player_order::services::OrderStateMachine;
use crate::domain::player_order::value_objects::{OrderBrief, PlayerOrderStatus, Publication};
use crate::domain::shared::{OrderId, Timestamp};

/// Longest cancellation reason kept on the event.
pub const MAX_CANCEL_REASON_CHARS: usize = 1000;

/// Budget inputs and the estimate computed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBudget {
    /// Factor snapshot.
    pub factors: BudgetFactors,
    /// Estimate for that snapshot.
    pub estimate: BudgetEstimate,
}

/// Accepted guarantees and their price against the current estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderGuarantees {
    /// Accepted selection.
    pub selection: GuaranteeSelection,
    /// Price; absent until a budget exists.
    pub quote: Option<GuaranteeQuote>,
}

/// Player Order aggregate root.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerOrder {
    id: OrderId,
    status: PlayerOrderStatus,
    brief: OrderBrief,
    budget: Option<OrderBudget>,
    guarantees: Option<OrderGuarantees>,
    risk_profile: Option<RiskProfile>,
    latest_validation: Option<ValidationSummary>,
    publication: Option<Publication>,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(skip)]
    events: Vec<OrderEvent>,
}

impl PlayerOrder {
    /// Create a new draft.
    ///
    /// Generates a `DraftCreated` event.
    #[must_use]
    pub fn create_draft(brief: OrderBrief) -> Self {
        let now = Timestamp::now();
        let id = OrderId::generate();
        let mut order = Self {
            id: id.clone(),
            status: PlayerOrderStatus::Draft,
            brief,
            budget: None,
            guarantees: None,
            risk_profile: None,
            latest_validation: None,
            publication: None,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };
        order.events.push(OrderEvent::DraftCreated {
            order_id: id,
            title: order.brief.title().to_string(),
            occurred_at: now,
        });
        order
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PlayerOrderStatus {
        self.status
    }

    /// Brief.
    #[must_use]
    pub const fn brief(&self) -> &OrderBrief {
        &self.brief
    }

    /// Budget, once computed.
    #[must_use]
    pub const fn budget(&self) -> Option<&OrderBudget> {
        self.budget.as_ref()
    }

    /// Guarantees, once selected.
    #[must_use]
    pub const fn guarantees(&self) -> Option<&OrderGuarantees> {
        self.guarantees.as_ref()
    }

    /// Cached risk profile.
    #[must_use]
    pub const fn risk_profile(&self) -> Option<&RiskProfile> {
        self.risk_profile.as_ref()
    }

    /// Latest validation snapshot.
    #[must_use]
    pub const fn latest_validation(&self) -> Option<&ValidationSummary> {
        self.latest_validation.as_ref()
    }

    /// Publication window.
    #[must_use]
    pub const fn publication(&self) -> Option<&Publication> {
        self.publication.as_ref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Replace the brief.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not editable.
    pub fn revise_brief(&mut self, brief: OrderBrief) -> Result<(), PlayerOrderError> {
        self.ensure_editable()?;
        self.revert_if_validated();
        self.brief = brief;
        self.touch();
        self.events.push(OrderEvent::BriefUpdated {
            order_id: self.id.clone(),
            occurred_at: self.updated_at,
        });
        Ok(())
    }

    /// Replace the budget and re-price any guarantees against the new estimate.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not editable or the guarantees cannot be
    /// re-priced.
    pub fn apply_budget(
        &mut self,
        factors: BudgetFactors,
        estimate: BudgetEstimate,
        selector: &GuaranteeSelector,
    ) -> Result<&BudgetEstimate, PlayerOrderError> {
        self.ensure_editable()?;
        let requote = self
            .guarantees
            .as_ref()
            .map(|guarantees| selector.quote(estimate.estimate, &guarantees.selection))
            .transpose()?;
        self.revert_if_validated();
        if let (Some(guarantees), Some(quote)) = (self.guarantees.as_mut(), requote) {
            guarantees.quote = Some(quote);
        }
        self.touch();
        self.events.push(OrderEvent::BudgetUpdated {
            order_id: self.id.clone(),
            estimate: estimate.estimate,
            occurred_at: self.updated_at,
        });
        Ok(&self.budget.insert(OrderBudget { factors, estimate }).estimate)
    }

    /// Check `requested` against `risk` and attach it if compliant.
    ///
    /// The assessed profile is cached only when the selection is accepted; a
    /// rejected request leaves the order untouched.
    ///
    /// # Errors
    ///
    /// Returns `GuaranteeBelowRiskFloor` if the terms are too weak, or a
    /// lifecycle error if the order is not editable.
    pub fn select_guarantees(
        &mut self,
        risk: RiskProfile,
        requested: &GuaranteeSelection,
        selector: &GuaranteeSelector,
    ) -> Result<GuaranteeSelection, PlayerOrderError> {
        self.ensure_editable()?;
        let accepted = selector.select_guarantee(&risk, requested)?;
        let quote = self
            .budget
            .as_ref()
            .map(|budget| selector.quote(budget.estimate.estimate, &accepted))
            .transpose()?;
        self.revert_if_validated();
        self.risk_profile = Some(risk);
        self.guarantees = Some(OrderGuarantees {
            selection: accepted.clone(),
            quote,
        });
        self.touch();
        self.events.push(OrderEvent::GuaranteesSelected {
            order_id: self.id.clone(),
            escrow_policy: accepted.escrow_policy(),
            insurance_tier: accepted.insurance_tier(),
            occurred_at: self.updated_at,
        });
        Ok(accepted)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Enter `validating`.
    ///
    /// A rejected order is first reopened to `draft`. Returns the status to
    /// restore if the pass is aborted.
    ///
    /// # Errors
    ///
    /// Returns error if validation cannot start from the current status.
    pub fn begin_validation(&mut self) -> Result<PlayerOrderStatus, PlayerOrderError> {
        if self.status == PlayerOrderStatus::Rejected {
            self.revert_if_validated();
        }
        let restore_to = self.status;
        self.transition_to(PlayerOrderStatus::Validating)?;
        self.events.push(OrderEvent::ValidationStarted {
            order_id: self.id.clone(),
            occurred_at: self.updated_at,
        });
        Ok(restore_to)
    }

    /// Cache a freshly assessed risk profile.
    ///
    /// Guarantees the new profile no longer allows are dropped together with
    /// the stale validation. Returns true when that happened.
    pub fn refresh_risk_profile(&mut self, profile: RiskProfile) -> bool {
        let violated = self
            .guarantees
            .as_ref()
            .and_then(|g| GuaranteeSelector::first_violation(&profile, &g.selection));
        self.risk_profile = Some(profile);
        let Some(rule) = violated else {
            return false;
        };
        self.guarantees = None;
        self.latest_validation = None;
        self.touch();
        self.events
            .push(OrderEvent::guarantees_invalidated(self.id.clone(), rule));
        true
    }

    /// Snapshot of the draft for the validation fan-out.
    #[must_use]
    pub fn validation_request(&self) -> ValidationRequest {
        ValidationRequest {
            order_id: self.id.clone(),
            brief: self.brief.clone(),
            budget: self.budget.as_ref().map(|b| b.estimate.clone()),
            guarantees: self.guarantees.as_ref().map(|g| g.selection.clone()),
            risk_profile: self.risk_profile.clone(),
            requested_at: Timestamp::now(),
        }
    }

    /// Settle a validation pass: `validated` if passed, `rejected` otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if no validation is in progress.
    pub fn complete_validation(
        &mut self,
        summary: ValidationSummary,
    ) -> Result<PlayerOrderStatus, PlayerOrderError> {
        self.ensure_validating(PlayerOrderStatus::Validated)?;
        let target = if summary.passed() {
            PlayerOrderStatus::Validated
        } else {
            PlayerOrderStatus::Rejected
        };
        self.transition_to(target)?;
        self.events.push(OrderEvent::ValidationCompleted {
            order_id: self.id.clone(),
            result: summary.result,
            issue_count: summary.checklist.len(),
            occurred_at: self.updated_at,
        });
        self.latest_validation = Some(summary);
        Ok(target)
    }

    /// Abandon a validation pass, restoring `restore_to`.
    ///
    /// Falls back to `draft` when the previous validation was discarded
    /// during the pass. The latest validation is otherwise left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if no validation is in progress.
    pub fn abort_validation(
        &mut self,
        restore_to: PlayerOrderStatus,
    ) -> Result<PlayerOrderStatus, PlayerOrderError> {
        self.ensure_validating(restore_to)?;
        let target = match restore_to {
            PlayerOrderStatus::Validated if self.latest_validation.is_some() => {
                PlayerOrderStatus::Validated
            }
            _ => PlayerOrderStatus::Draft,
        };
        self.transition_to(target)?;
        self.events.push(OrderEvent::ValidationAborted {
            order_id: self.id.clone(),
            restored_status: target,
            occurred_at: self.updated_at,
        });
        Ok(target)
    }

    // ========================================================================
    // Publication and closure
    // ========================================================================

    /// Publish a validated order.
    ///
    /// # Errors
    ///
    /// Returns `NotValidated` unless the order is `validated` with a passed
    /// latest summary, or `OrderClosed` for terminal orders.
    pub fn publish(&mut self) -> Result<&Publication, PlayerOrderError> {
        if self.status.is_terminal() {
            return Err(PlayerOrderError::OrderClosed {
                status: self.status,
            });
        }
        let passed = self
            .latest_validation
            .as_ref()
            .is_some_and(ValidationSummary::passed);
        if self.status != PlayerOrderStatus::Validated || !passed {
            return Err(PlayerOrderError::NotValidated {
                status: self.status,
            });
        }
        self.transition_to(PlayerOrderStatus::Published)?;
        let reward = self
            .budget
            .as_ref()
            .map(|b| b.estimate.estimate)
            .unwrap_or_default();
        self.events.push(OrderEvent::Published {
            order_id: self.id.clone(),
            reward,
            occurred_at: self.updated_at,
        });
        Ok(&*self.publication.insert(Publication {
            published_at: self.updated_at,
            expires_at: self.brief.deadline(),
        }))
    }

    /// Mark a published order as fulfilled.
    ///
    /// # Errors
    ///
    /// Returns error unless the order is published.
    pub fn complete(&mut self) -> Result<(), PlayerOrderError> {
        self.transition_to(PlayerOrderStatus::Completed)?;
        self.events.push(OrderEvent::Completed {
            order_id: self.id.clone(),
            occurred_at: self.updated_at,
        });
        Ok(())
    }

    /// Withdraw the order.
    ///
    /// Reasons longer than [`MAX_CANCEL_REASON_CHARS`] are truncated.
    ///
    /// # Errors
    ///
    /// Returns `OrderClosed` if the order is already terminal.
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), PlayerOrderError> {
        let from = self.status;
        self.transition_to(PlayerOrderStatus::Cancelled)?;
        let mut reason = reason.into();
        if let Some((cut, _)) = reason.char_indices().nth(MAX_CANCEL_REASON_CHARS) {
            reason.truncate(cut);
        }
        self.events.push(OrderEvent::Cancelled {
            order_id: self.id.clone(),
            from,
            reason,
            occurred_at: self.updated_at,
        });
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    fn ensure_editable(&self) -> Result<(), PlayerOrderError> {
        if self.status.is_editable() {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(PlayerOrderError::OrderClosed {
                status: self.status,
            });
        }
        Err(PlayerOrderError::InvalidStateTransition {
            from: self.status,
            to: PlayerOrderStatus::Draft,
            reason: format!("Orders cannot be edited while {}", self.status),
        })
    }

    fn ensure_validating(&self, to: PlayerOrderStatus) -> Result<(), PlayerOrderError> {
        if self.status == PlayerOrderStatus::Validating {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(PlayerOrderError::OrderClosed {
                status: self.status,
            });
        }
        Err(PlayerOrderError::InvalidStateTransition {
            from: self.status,
            to,
            reason: "No validation is in progress".to_string(),
        })
    }

    fn revert_if_validated(&mut self) {
        if !self.status.reverts_on_edit() {
            return;
        }
        let from = self.status;
        self.status = PlayerOrderStatus::Draft;
        self.latest_validation = None;
        self.touch();
        self.events.push(OrderEvent::RevertedToDraft {
            order_id: self.id.clone(),
            from,
            occurred_at: self.updated_at,
        });
    }

    fn transition_to(&mut self, target: PlayerOrderStatus) -> Result<(), PlayerOrderError> {
        OrderStateMachine::validate_transition(self.status, target)?;
        self.status = target;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_budget::{BudgetEngine, FactorInputs};
    use crate::domain::order_guarantee::{
        EscrowPolicy, GuaranteeError, GuaranteePricing, InsuranceTier, LegalStatus, RiskLevel,
    };
    use crate::domain::order_validation::{ValidationIssue, ValidationSource};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn draft() -> PlayerOrder {
        let mut order = PlayerOrder::create_draft(OrderBrief::new("Escort the convoy").unwrap());
        order.drain_events();
        order
    }

    fn factors() -> BudgetFactors {
        BudgetFactors::try_from(FactorInputs {
            complexity_factors: vec![("a".into(), dec!(3.0)), ("b".into(), dec!(2.0))],
            risk_modifier: dec!(1.2),
            market_index: dec!(10),
            time_modifier: dec!(1.0),
            bonuses: vec![dec!(5)],
            penalties: vec![dec!(2)],
        })
        .unwrap()
    }

    fn priced(order: &mut PlayerOrder) {
        let factors = factors();
        let estimate = BudgetEngine::default().compute_budget(&factors);
        order
            .apply_budget(factors, estimate, &GuaranteeSelector::default())
            .unwrap();
    }

    fn summary(issues: Vec<ValidationIssue>) -> ValidationSummary {
        ValidationSummary::from_issues(issues, BTreeMap::new(), Timestamp::now())
    }

    fn validated() -> PlayerOrder {
        let mut order = draft();
        priced(&mut order);
        order.begin_validation().unwrap();
        order.complete_validation(summary(vec![])).unwrap();
        order.drain_events();
        order
    }

    #[test]
    fn create_draft_emits_event() {
        let mut order = PlayerOrder::create_draft(OrderBrief::new("Scout Pacifica").unwrap());
        assert_eq!(order.status(), PlayerOrderStatus::Draft);
        let events = order.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "DRAFT_CREATED");
        assert!(order.pending_events().is_empty());
    }

    #[test]
    fn apply_budget_stores_estimate() {
        let mut order = draft();
        priced(&mut order);
        assert_eq!(order.budget().unwrap().estimate.estimate.amount(), dec!(63));
        assert_eq!(order.pending_events()[0].event_type(), "BUDGET_UPDATED");
    }

    #[test]
    fn guarantees_are_quoted_when_budget_exists() {
        let mut order = draft();
        priced(&mut order);
        let selector = GuaranteeSelector::default();
        order
            .select_guarantees(
                RiskProfile::new(RiskLevel::Low, LegalStatus::Legal),
                &GuaranteeSelection::escrow_only(EscrowPolicy::Extended),
                &selector,
            )
            .unwrap();
        let quote = order.guarantees().unwrap().quote.as_ref().unwrap();
        assert_eq!(quote.escrow_hold.amount(), dec!(69.30));
    }

    #[test]
    fn budget_change_requotes_guarantees() {
        let mut order = draft();
        let selector = GuaranteeSelector::default();
        order
            .select_guarantees(
                RiskProfile::default(),
                &GuaranteeSelection::escrow_only(EscrowPolicy::Standard),
                &selector,
            )
            .unwrap();
        assert!(order.guarantees().unwrap().quote.is_none());
        priced(&mut order);
        let quote = order.guarantees().unwrap().quote.as_ref().unwrap();
        assert_eq!(quote.escrow_hold.amount(), dec!(63));
    }

    #[test]
    fn rejected_guarantees_leave_order_untouched() {
        let mut order = draft();
        let err = order
            .select_guarantees(
                RiskProfile::new(RiskLevel::Extreme, LegalStatus::Legal),
                &GuaranteeSelection::escrow_only(EscrowPolicy::Standard),
                &GuaranteeSelector::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            PlayerOrderError::Guarantee(GuaranteeError::BelowRiskFloor { .. })
        ));
        assert!(order.guarantees().is_none());
        assert!(order.risk_profile().is_none());
        assert!(order.pending_events().is_empty());
    }

    #[test]
    fn validation_passes_to_validated() {
        let order = validated();
        assert_eq!(order.status(), PlayerOrderStatus::Validated);
        assert!(order.latest_validation().unwrap().passed());
    }

    #[test]
    fn failed_validation_rejects() {
        let mut order = draft();
        order.begin_validation().unwrap();
        let status = order
            .complete_validation(summary(vec![ValidationIssue::error(
                ValidationSource::Economy,
                "X",
                "x",
            )]))
            .unwrap();
        assert_eq!(status, PlayerOrderStatus::Rejected);
    }

    #[test]
    fn editing_validated_order_reverts_to_draft() {
        let mut order = validated();
        order.revise_brief(OrderBrief::new("New title here").unwrap()).unwrap();
        assert_eq!(order.status(), PlayerOrderStatus::Draft);
        assert!(order.latest_validation().is_none());
        let types: Vec<_> = order.pending_events().iter().map(OrderEvent::event_type).collect();
        assert_eq!(types, ["REVERTED_TO_DRAFT", "BRIEF_UPDATED"]);
    }

    #[test]
    fn validating_a_rejected_order_reopens_it() {
        let mut order = draft();
        order.begin_validation().unwrap();
        order
            .complete_validation(summary(vec![ValidationIssue::error(
                ValidationSource::World,
                "X",
                "x",
            )]))
            .unwrap();
        let restore = order.begin_validation().unwrap();
        assert_eq!(restore, PlayerOrderStatus::Draft);
        assert_eq!(order.status(), PlayerOrderStatus::Validating);
    }

    #[test]
    fn publish_requires_validation() {
        let mut order = draft();
        assert!(matches!(
            order.publish(),
            Err(PlayerOrderError::NotValidated { .. })
        ));
    }

    #[test]
    fn publish_validated_order() {
        let mut order = validated();
        let publication = *order.publish().unwrap();
        assert_eq!(order.status(), PlayerOrderStatus::Published);
        assert_eq!(publication.published_at, order.updated_at());
        assert!(matches!(
            order.pending_events().last(),
            Some(OrderEvent::Published { .. })
        ));
    }

    #[test]
    fn published_orders_are_not_editable() {
        let mut order = validated();
        order.publish().unwrap();
        let err = order.revise_brief(OrderBrief::new("Changed title").unwrap()).unwrap_err();
        assert!(matches!(err, PlayerOrderError::InvalidStateTransition { .. }));
    }

    #[test]
    fn closed_orders_reject_everything() {
        let mut order = draft();
        order.cancel("no longer needed").unwrap();
        assert!(matches!(order.cancel("again"), Err(PlayerOrderError::OrderClosed { .. })));
        assert!(matches!(order.publish(), Err(PlayerOrderError::OrderClosed { .. })));
        assert!(matches!(
            order.revise_brief(OrderBrief::new("Anything").unwrap()),
            Err(PlayerOrderError::OrderClosed { .. })
        ));
        assert!(matches!(order.begin_validation(), Err(PlayerOrderError::OrderClosed { .. })));
    }

    #[test]
    fn complete_requires_publication() {
        let mut order = validated();
        assert!(order.complete().is_err());
        order.publish().unwrap();
        order.complete().unwrap();
        assert_eq!(order.status(), PlayerOrderStatus::Completed);
    }

    #[test]
    fn risk_refresh_drops_noncompliant_guarantees() {
        let mut order = draft();
        order
            .select_guarantees(
                RiskProfile::default(),
                &GuaranteeSelection::escrow_only(EscrowPolicy::Standard),
                &GuaranteeSelector::default(),
            )
            .unwrap();
        order.begin_validation().unwrap();
        let dropped =
            order.refresh_risk_profile(RiskProfile::new(RiskLevel::Extreme, LegalStatus::Legal));
        assert!(dropped);
        assert!(order.guarantees().is_none());
        assert_eq!(
            order.risk_profile().unwrap().risk_level,
            RiskLevel::Extreme
        );
    }

    #[test]
    fn risk_refresh_keeps_compliant_guarantees() {
        let mut order = draft();
        let terms = GuaranteeSelection::escrow_only(EscrowPolicy::Standard)
            .with_insurance(InsuranceTier::Basic);
        order
            .select_guarantees(RiskProfile::default(), &terms, &GuaranteeSelector::default())
            .unwrap();
        assert!(!order.refresh_risk_profile(RiskProfile::new(RiskLevel::Extreme, LegalStatus::Grey)));
        assert!(order.guarantees().is_some());
    }

    #[test]
    fn abort_restores_validated_with_snapshot() {
        let mut order = validated();
        let restore = order.begin_validation().unwrap();
        assert_eq!(order.abort_validation(restore).unwrap(), PlayerOrderStatus::Validated);
        assert!(order.latest_validation().is_some());
    }

    #[test]
    fn abort_falls_back_to_draft_when_snapshot_discarded() {
        let mut order = draft();
        order
            .select_guarantees(
                RiskProfile::default(),
                &GuaranteeSelection::escrow_only(EscrowPolicy::Standard),
                &GuaranteeSelector::default(),
            )
            .unwrap();
        order.begin_validation().unwrap();
        order.complete_validation(summary(vec![])).unwrap();
        let restore = order.begin_validation().unwrap();
        order.refresh_risk_profile(RiskProfile::new(RiskLevel::Low, LegalStatus::Illegal));
        assert_eq!(order.abort_validation(restore).unwrap(), PlayerOrderStatus::Draft);
    }

    #[test]
    fn long_cancel_reason_is_truncated() {
        let mut order = draft();
        order.cancel("é".repeat(MAX_CANCEL_REASON_CHARS + 50)).unwrap();
        let events = order.drain_events();
        let Some(OrderEvent::Cancelled { reason, .. }) = events.last() else {
            panic!("expected a cancellation event");
        };
        assert_eq!(reason.chars().count(), MAX_CANCEL_REASON_CHARS);

        let mut short = draft();
        short.cancel("no longer needed").unwrap();
        assert!(matches!(
            short.drain_events().last(),
            Some(OrderEvent::Cancelled { reason, .. }) if reason == "no longer needed"
        ));
    }

    #[test]
    fn unpriceable_guarantees_leave_order_untouched() {
        let mut order = validated();
        let overflowing = GuaranteeSelector::new(GuaranteePricing {
            premium_escrow: rust_decimal::Decimal::MAX,
            ..GuaranteePricing::default()
        });
        let terms = GuaranteeSelection::escrow_only(EscrowPolicy::Premium);

        let err = order
            .select_guarantees(RiskProfile::default(), &terms, &overflowing)
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_GUARANTEE_TERMS");
        assert_eq!(order.status(), PlayerOrderStatus::Validated);
        assert!(order.guarantees().is_none());
        assert!(order.drain_events().is_empty());
    }

    #[test]
    fn complete_validation_requires_validating() {
        let mut order = draft();
        assert!(order.complete_validation(summary(vec![])).is_err());
    }
}
