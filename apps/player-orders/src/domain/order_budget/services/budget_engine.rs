//! Budget Engine
//!
//! Combines validated [`BudgetFactors`] into a final price:
//!
//! ```text
//! base          = effective_complexity * market_index
//! risk_adjusted = base * risk_modifier
//! time_adjusted = risk_adjusted * time_modifier
//! estimate      = max(0, time_adjusted + Σ bonuses - Σ penalties)
//! ```
//!
//! All arithmetic is decimal; the result is rounded half-up to the currency's
//! minor units. The engine holds no state besides its policy and never fails.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::order_budget::value_objects::{BudgetBreakdown, BudgetEstimate, BudgetFactors};
use crate::domain::shared::Money;

/// Currency settings applied to every estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Currency code.
    pub currency: String,
    /// Decimal places of the currency's minor unit.
    pub minor_units: u32,
    /// Commission charged on the estimate.
    pub commission_rate: Decimal,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            currency: "eddies".to_string(),
            minor_units: 2,
            commission_rate: dec!(0.08),
        }
    }
}

/// Pure pricing service.
#[derive(Debug, Clone, Default)]
pub struct BudgetEngine {
    policy: BudgetPolicy,
}

impl BudgetEngine {
    /// Create an engine with the given policy.
    #[must_use]
    pub const fn new(policy: BudgetPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &BudgetPolicy {
        &self.policy
    }

    /// Price an order. Deterministic: the same factors always yield the same estimate.
    #[must_use]
    pub fn compute_budget(&self, factors: &BudgetFactors) -> BudgetEstimate {
        let effective_complexity = factors.effective_complexity();
        let base = Money::new(effective_complexity * factors.market_index());
        let risk_adjusted = base * factors.risk_modifier();
        let time_adjusted = risk_adjusted * factors.time_modifier();
        let bonus_sum: Money = factors.bonuses().iter().copied().sum();
        let penalty_sum: Money = factors.penalties().iter().copied().sum();
        let unclamped = time_adjusted + bonus_sum - penalty_sum;

        let minor_units = self.policy.minor_units;
        let estimate = unclamped.floor_at_zero().round_to(minor_units);
        let commission = estimate.scale(self.policy.commission_rate).round_to(minor_units);

        BudgetEstimate {
            estimate,
            commission,
            currency: self.policy.currency.clone(),
            floored: unclamped.is_negative(),
            breakdown: BudgetBreakdown {
                effective_complexity,
                base,
                risk_adjusted,
                time_adjusted,
                bonus_sum,
                penalty_sum,
                unclamped,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_budget::value_objects::{
        FactorInputs, MAX_ADJUSTMENT, MAX_MARKET_INDEX, MAX_MODIFIER, MIN_MODIFIER,
    };
    use proptest::prelude::*;

    fn factors(
        weights: &[Decimal],
        risk: Decimal,
        market: Decimal,
        time: Decimal,
        bonuses: &[Decimal],
        penalties: &[Decimal],
    ) -> BudgetFactors {
        BudgetFactors::try_from(FactorInputs {
            complexity_factors: weights
                .iter()
                .enumerate()
                .map(|(i, w)| (format!("factor-{i}"), *w))
                .collect(),
            risk_modifier: risk,
            market_index: market,
            time_modifier: time,
            bonuses: bonuses.to_vec(),
            penalties: penalties.to_vec(),
        })
        .unwrap()
    }

    #[test]
    fn reference_example_prices_to_63() {
        let engine = BudgetEngine::default();
        let f = factors(
            &[dec!(3.0), dec!(2.0)],
            dec!(1.2),
            dec!(10),
            dec!(1.0),
            &[dec!(5)],
            &[dec!(2)],
        );
        let result = engine.compute_budget(&f);
        assert_eq!(result.estimate.amount(), dec!(63));
        assert_eq!(result.breakdown.base.amount(), dec!(50));
        assert_eq!(result.breakdown.risk_adjusted.amount(), dec!(60));
        assert!(!result.floored);
        assert_eq!(result.commission.amount(), dec!(5.04));
        assert_eq!(result.currency, "eddies");
    }

    #[test]
    fn penalties_exceeding_total_floor_at_zero() {
        let engine = BudgetEngine::default();
        let f = factors(&[dec!(1)], dec!(1), dec!(10), dec!(1), &[], &[dec!(500)]);
        let result = engine.compute_budget(&f);
        assert_eq!(result.estimate, Money::ZERO);
        assert!(result.floored);
        assert_eq!(result.breakdown.unclamped.amount(), dec!(-490));
        assert_eq!(result.commission, Money::ZERO);
    }

    #[test]
    fn rounds_half_up_to_minor_units() {
        let engine = BudgetEngine::default();
        // 0.125 * 1 * 1 * 1 = 0.125 -> 0.13
        let f = factors(&[dec!(0.125)], dec!(1), dec!(1), dec!(1), &[], &[]);
        assert_eq!(engine.compute_budget(&f).estimate.amount(), dec!(0.13));
    }

    #[test]
    fn zero_minor_units_rounds_to_whole_currency() {
        let engine = BudgetEngine::new(BudgetPolicy {
            minor_units: 0,
            ..BudgetPolicy::default()
        });
        let f = factors(&[dec!(2.5)], dec!(1), dec!(1), dec!(1), &[], &[]);
        assert_eq!(engine.compute_budget(&f).estimate.amount(), dec!(3));
    }

    #[test]
    fn repeated_computation_serializes_identically() {
        let engine = BudgetEngine::default();
        let f = factors(
            &[dec!(7.3), dec!(1.1)],
            dec!(1.7),
            dec!(333.33),
            dec!(0.9),
            &[dec!(12.5)],
            &[dec!(3.25)],
        );
        let first = serde_json::to_string(&engine.compute_budget(&f)).unwrap();
        let second = serde_json::to_string(&engine.compute_budget(&f)).unwrap();
        assert_eq!(first, second);
    }

    fn weight() -> impl Strategy<Value = Decimal> {
        (0i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn modifier() -> impl Strategy<Value = Decimal> {
        (50i64..=200).prop_map(|hundredths| Decimal::new(hundredths, 2))
    }

    fn market() -> impl Strategy<Value = Decimal> {
        (0i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn adjustment() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn estimate_is_non_negative_and_deterministic(
            weights in prop::collection::vec(weight(), 1..8),
            risk in modifier(),
            market in market(),
            time in modifier(),
            bonuses in prop::collection::vec(adjustment(), 0..4),
            penalties in prop::collection::vec(adjustment(), 0..4),
        ) {
            let engine = BudgetEngine::default();
            let f = factors(&weights, risk, market, time, &bonuses, &penalties);
            let first = engine.compute_budget(&f);
            let second = engine.compute_budget(&f);
            prop_assert!(!first.estimate.is_negative());
            prop_assert!(first.estimate.amount().scale() <= 2);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn modifiers_outside_bounds_are_rejected(
            below in (0i64..50).prop_map(|h| Decimal::new(h, 2)),
            above in (201i64..1_000).prop_map(|h| Decimal::new(h, 2)),
        ) {
            for (risk, time) in [(below, dec!(1)), (above, dec!(1)), (dec!(1), below), (dec!(1), above)] {
                let raw = FactorInputs {
                    complexity_factors: vec![("f".into(), dec!(1))],
                    risk_modifier: risk,
                    market_index: dec!(1),
                    time_modifier: time,
                    bonuses: vec![],
                    penalties: vec![],
                };
                let err = BudgetFactors::try_from(raw).unwrap_err();
                prop_assert_eq!(err.code(), "INVALID_FACTOR_RANGE");
            }
        }
    }

    #[test]
    fn extreme_valid_inputs_do_not_overflow() {
        let engine = BudgetEngine::default();
        let weights = vec![dec!(1000); 64];
        let f = factors(
            &weights,
            MAX_MODIFIER,
            MAX_MARKET_INDEX,
            MAX_MODIFIER,
            &[MAX_ADJUSTMENT],
            &[],
        );
        assert!(engine.compute_budget(&f).estimate.is_positive());
        let g = factors(&[dec!(0)], MIN_MODIFIER, dec!(0), MIN_MODIFIER, &[], &[]);
        assert_eq!(engine.compute_budget(&g).estimate, Money::ZERO);
    }
}
