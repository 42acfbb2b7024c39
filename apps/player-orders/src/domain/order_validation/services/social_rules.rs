//! Social Rules
//!
//! The validation rules this service owns itself. Every other source is
//! reached through an upstream adapter.

use crate::domain::order_guarantee::{GuaranteeSelector, RiskLevel};
use crate::domain::order_validation::value_objects::{
    ValidationIssue, ValidationRequest, ValidationSource,
};

/// Shortest acceptable title.
pub const MIN_TITLE_CHARS: usize = 5;

const SOURCE: ValidationSource = ValidationSource::Social;

/// Evaluates a draft against the social domain's publication rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocialRules;

impl SocialRules {
    /// Check a draft snapshot. Returns every finding, in rule order.
    #[must_use]
    pub fn evaluate(&self, request: &ValidationRequest) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let brief = &request.brief;

        if brief.title().chars().count() < MIN_TITLE_CHARS {
            issues.push(
                ValidationIssue::error(
                    SOURCE,
                    "TITLE_TOO_SHORT",
                    format!("Title must be at least {MIN_TITLE_CHARS} characters long"),
                )
                .with_field("brief.title")
                .with_remediation("Give the order a more descriptive title"),
            );
        }

        if brief.description().trim().is_empty() {
            issues.push(
                ValidationIssue::info(SOURCE, "DESCRIPTION_EMPTY", "Order has no description")
                    .with_field("brief.description")
                    .with_remediation("Describe the objective so contractors can assess it"),
            );
        }

        if brief
            .deadline()
            .is_some_and(|deadline| deadline.is_before(request.requested_at))
        {
            issues.push(
                ValidationIssue::error(SOURCE, "DEADLINE_IN_PAST", "Deadline cannot be in the past")
                    .with_field("brief.deadline")
                    .with_remediation("Move the deadline into the future or remove it"),
            );
        }

        match &request.budget {
            None => issues.push(
                ValidationIssue::error(SOURCE, "BUDGET_MISSING", "Order has no computed budget")
                    .with_field("budget")
                    .with_remediation("Submit budget factors"),
            ),
            Some(budget) if !budget.estimate.is_positive() => issues.push(
                ValidationIssue::error(SOURCE, "REWARD_NOT_POSITIVE", "Reward must be positive")
                    .with_field("budget.estimate")
                    .with_remediation("Raise complexity or bonuses, or reduce penalties"),
            ),
            Some(_) => {}
        }

        let Some(risk) = &request.risk_profile else {
            issues.push(
                ValidationIssue::error(
                    SOURCE,
                    "RISK_PROFILE_UNKNOWN",
                    "Risk profile could not be assessed",
                )
                .with_field("risk_profile")
                .with_remediation("Retry validation once risk intelligence is reachable"),
            );
            return issues;
        };

        match &request.guarantees {
            None => issues.push(
                ValidationIssue::error(SOURCE, "GUARANTEES_MISSING", "No guarantees selected")
                    .with_field("guarantees")
                    .with_remediation("Select an escrow policy"),
            ),
            Some(selection) => {
                if let Some(rule) = GuaranteeSelector::first_violation(risk, selection) {
                    issues.push(
                        ValidationIssue::critical(
                            SOURCE,
                            "GUARANTEE_BELOW_RISK_FLOOR",
                            format!("Guarantees violate {rule}: requires {}", rule.required_terms()),
                        )
                        .with_field("guarantees")
                        .with_remediation(rule.remediation()),
                    );
                }
            }
        }

        if risk.risk_level == RiskLevel::Extreme {
            issues.push(
                ValidationIssue::warning(
                    SOURCE,
                    "HIGH_RISK_ORDER",
                    "Extreme risk orders have low success probability",
                )
                .with_field("risk_profile.risk_level")
                .with_remediation("Consider lowering risk level or increasing reward"),
            );
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_budget::{BudgetEngine, BudgetFactors, FactorInputs};
    use crate::domain::order_guarantee::{
        EscrowPolicy, GuaranteeSelection, InsuranceTier, LegalStatus, RiskProfile,
    };
    use crate::domain::player_order::value_objects::OrderBrief;
    use crate::domain::shared::{OrderId, Timestamp};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn compliant_request() -> ValidationRequest {
        let mut brief = OrderBrief::new("Escort the convoy").unwrap();
        brief.set_description("Keep the trucks alive through Badlands");
        let factors = BudgetFactors::try_from(FactorInputs {
            complexity_factors: vec![("distance".into(), dec!(4))],
            risk_modifier: dec!(1),
            market_index: dec!(10),
            time_modifier: dec!(1),
            bonuses: vec![],
            penalties: vec![],
        })
        .unwrap();
        ValidationRequest {
            order_id: OrderId::new("po-1"),
            brief,
            budget: Some(BudgetEngine::default().compute_budget(&factors)),
            guarantees: Some(GuaranteeSelection::escrow_only(EscrowPolicy::Standard)),
            risk_profile: Some(RiskProfile::new(RiskLevel::Medium, LegalStatus::Legal)),
            requested_at: Timestamp::now(),
        }
    }

    fn codes(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn compliant_draft_has_no_issues() {
        assert!(SocialRules.evaluate(&compliant_request()).is_empty());
    }

    #[test]
    fn short_title_is_an_error() {
        let mut request = compliant_request();
        request.brief.set_title("Hit").unwrap();
        let issues = SocialRules.evaluate(&request);
        assert_eq!(codes(&issues), ["TITLE_TOO_SHORT"]);
        assert_eq!(issues[0].message, "Title must be at least 5 characters long");
    }

    #[test]
    fn past_deadline_is_an_error() {
        let mut request = compliant_request();
        *request.brief.deadline_mut() = Some(request.requested_at.plus(Duration::hours(-1)));
        assert_eq!(codes(&SocialRules.evaluate(&request)), ["DEADLINE_IN_PAST"]);
    }

    #[test]
    fn missing_budget_and_guarantees() {
        let mut request = compliant_request();
        request.budget = None;
        request.guarantees = None;
        assert_eq!(
            codes(&SocialRules.evaluate(&request)),
            ["BUDGET_MISSING", "GUARANTEES_MISSING"]
        );
    }

    #[test]
    fn zero_estimate_is_not_a_reward() {
        let mut request = compliant_request();
        if let Some(budget) = request.budget.as_mut() {
            budget.estimate = crate::domain::shared::Money::ZERO;
        }
        assert_eq!(codes(&SocialRules.evaluate(&request)), ["REWARD_NOT_POSITIVE"]);
    }

    #[test]
    fn unknown_risk_stops_guarantee_checks() {
        let mut request = compliant_request();
        request.risk_profile = None;
        request.guarantees = None;
        assert_eq!(codes(&SocialRules.evaluate(&request)), ["RISK_PROFILE_UNKNOWN"]);
    }

    #[test]
    fn extreme_risk_without_insurance() {
        let mut request = compliant_request();
        request.risk_profile = Some(RiskProfile::new(RiskLevel::Extreme, LegalStatus::Legal));
        let issues = SocialRules.evaluate(&request);
        assert_eq!(codes(&issues), ["GUARANTEE_BELOW_RISK_FLOOR", "HIGH_RISK_ORDER"]);
        assert_eq!(
            issues[1].remediation.as_deref(),
            Some("Consider lowering risk level or increasing reward")
        );
    }

    #[test]
    fn extreme_risk_with_insurance_only_warns() {
        let mut request = compliant_request();
        request.risk_profile = Some(RiskProfile::new(RiskLevel::Extreme, LegalStatus::Legal));
        request.guarantees = Some(
            GuaranteeSelection::escrow_only(EscrowPolicy::Standard)
                .with_insurance(InsuranceTier::Basic),
        );
        assert_eq!(codes(&SocialRules.evaluate(&request)), ["HIGH_RISK_ORDER"]);
    }

    #[test]
    fn every_issue_is_tagged_social() {
        let mut request = compliant_request();
        request.brief.set_description("");
        request.budget = None;
        assert!(
            SocialRules
                .evaluate(&request)
                .iter()
                .all(|i| i.source == ValidationSource::Social)
        );
    }
}
