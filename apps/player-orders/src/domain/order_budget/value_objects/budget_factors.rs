//! Budget factors: the validated input snapshot for pricing an order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::ComplexityFactor;
use crate::domain::order_budget::errors::FactorError;
use crate::domain::shared::Money;

/// Lower bound for risk and time modifiers.
pub const MIN_MODIFIER: Decimal = dec!(0.5);
/// Upper bound for risk and time modifiers.
pub const MAX_MODIFIER: Decimal = dec!(2.0);
/// Upper bound for the market index.
pub const MAX_MARKET_INDEX: Decimal = dec!(1_000_000);
/// Upper bound for a single bonus or penalty amount.
pub const MAX_ADJUSTMENT: Decimal = dec!(10_000_000);
/// Maximum entries in any factor list.
pub const MAX_LIST_LEN: usize = 64;

/// Unvalidated factor values as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorInputs {
    /// `(name, weight)` pairs in client order.
    pub complexity_factors: Vec<(String, Decimal)>,
    /// Risk multiplier.
    pub risk_modifier: Decimal,
    /// Economy market index.
    pub market_index: Decimal,
    /// Time pressure multiplier.
    pub time_modifier: Decimal,
    /// Flat bonus amounts.
    pub bonuses: Vec<Decimal>,
    /// Flat penalty amounts.
    pub penalties: Vec<Decimal>,
}

/// Validated, immutable budget inputs.
///
/// Every bound is checked at construction, so a `BudgetFactors` value can
/// always be priced. Changing any input means building a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetFactors {
    complexity_factors: Vec<ComplexityFactor>,
    risk_modifier: Decimal,
    market_index: Decimal,
    time_modifier: Decimal,
    bonuses: Vec<Money>,
    penalties: Vec<Money>,
}

impl BudgetFactors {
    /// Sum of all complexity weights.
    #[must_use]
    pub fn effective_complexity(&self) -> Decimal {
        self.complexity_factors.iter().map(ComplexityFactor::weight).sum()
    }

    /// Complexity factors in client order.
    #[must_use]
    pub fn complexity_factors(&self) -> &[ComplexityFactor] {
        &self.complexity_factors
    }

    /// Risk multiplier.
    #[must_use]
    pub const fn risk_modifier(&self) -> Decimal {
        self.risk_modifier
    }

    /// Market index.
    #[must_use]
    pub const fn market_index(&self) -> Decimal {
        self.market_index
    }

    /// Time multiplier.
    #[must_use]
    pub const fn time_modifier(&self) -> Decimal {
        self.time_modifier
    }

    /// Bonus amounts.
    #[must_use]
    pub fn bonuses(&self) -> &[Money] {
        &self.bonuses
    }

    /// Penalty amounts.
    #[must_use]
    pub fn penalties(&self) -> &[Money] {
        &self.penalties
    }
}

impl TryFrom<FactorInputs> for BudgetFactors {
    type Error = FactorError;

    fn try_from(inputs: FactorInputs) -> Result<Self, Self::Error> {
        if inputs.complexity_factors.is_empty() {
            return Err(FactorError::out_of_range(
                "complexity_factors",
                "at least one complexity factor is required",
            ));
        }
        check_len("complexity_factors", inputs.complexity_factors.len())?;
        check_len("bonuses", inputs.bonuses.len())?;
        check_len("penalties", inputs.penalties.len())?;

        let complexity_factors = inputs
            .complexity_factors
            .into_iter()
            .enumerate()
            .map(|(i, (name, weight))| {
                ComplexityFactor::try_new(&format!("complexity_factors[{i}]"), name, weight)
            })
            .collect::<Result<Vec<_>, _>>()?;

        check_range("risk_modifier", inputs.risk_modifier, MIN_MODIFIER, MAX_MODIFIER)?;
        check_range("time_modifier", inputs.time_modifier, MIN_MODIFIER, MAX_MODIFIER)?;
        check_range(
            "market_index",
            inputs.market_index,
            Decimal::ZERO,
            MAX_MARKET_INDEX,
        )?;

        let bonuses = adjustments("bonuses", inputs.bonuses)?;
        let penalties = adjustments("penalties", inputs.penalties)?;

        Ok(Self {
            complexity_factors,
            risk_modifier: inputs.risk_modifier,
            market_index: inputs.market_index,
            time_modifier: inputs.time_modifier,
            bonuses,
            penalties,
        })
    }
}

fn check_len(field: &str, len: usize) -> Result<(), FactorError> {
    if len > MAX_LIST_LEN {
        return Err(FactorError::out_of_range(
            field,
            format!("{len} entries exceeds the limit of {MAX_LIST_LEN}"),
        ));
    }
    Ok(())
}

fn check_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> Result<(), FactorError> {
    if value < min || value > max {
        return Err(FactorError::out_of_range(
            field,
            format!("{value} must be within [{min}, {max}]"),
        ));
    }
    Ok(())
}

fn adjustments(field: &str, amounts: Vec<Decimal>) -> Result<Vec<Money>, FactorError> {
    amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            check_range(&format!("{field}[{i}]"), amount, Decimal::ZERO, MAX_ADJUSTMENT)
                .map(|()| Money::new(amount))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> FactorInputs {
        FactorInputs {
            complexity_factors: vec![("stealth".into(), dec!(3.0)), ("combat".into(), dec!(2.0))],
            risk_modifier: dec!(1.2),
            market_index: dec!(10),
            time_modifier: dec!(1.0),
            bonuses: vec![dec!(5)],
            penalties: vec![dec!(2)],
        }
    }

    #[test]
    fn effective_complexity_sums_weights() {
        let factors = BudgetFactors::try_from(inputs()).unwrap();
        assert_eq!(factors.effective_complexity(), dec!(5.0));
        assert_eq!(factors.complexity_factors()[0].name(), "stealth");
    }

    #[test]
    fn empty_complexity_is_rejected() {
        let mut raw = inputs();
        raw.complexity_factors.clear();
        let err = BudgetFactors::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "complexity_factors");
    }

    #[test]
    fn too_many_factors_is_rejected() {
        let mut raw = inputs();
        raw.complexity_factors = (0..=MAX_LIST_LEN).map(|i| (format!("f{i}"), dec!(1))).collect();
        assert!(BudgetFactors::try_from(raw).is_err());
    }

    #[test]
    fn modifier_bounds_are_inclusive() {
        let mut raw = inputs();
        raw.risk_modifier = MIN_MODIFIER;
        raw.time_modifier = MAX_MODIFIER;
        assert!(BudgetFactors::try_from(raw).is_ok());
    }

    #[test]
    fn risk_modifier_out_of_range() {
        let mut raw = inputs();
        raw.risk_modifier = dec!(2.01);
        let err = BudgetFactors::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "risk_modifier");
    }

    #[test]
    fn time_modifier_out_of_range() {
        let mut raw = inputs();
        raw.time_modifier = dec!(0.49);
        let err = BudgetFactors::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "time_modifier");
    }

    #[test]
    fn negative_market_index_is_rejected() {
        let mut raw = inputs();
        raw.market_index = dec!(-1);
        assert_eq!(BudgetFactors::try_from(raw).unwrap_err().field(), "market_index");
    }

    #[test]
    fn negative_penalty_names_its_index() {
        let mut raw = inputs();
        raw.penalties = vec![dec!(1), dec!(-3)];
        assert_eq!(BudgetFactors::try_from(raw).unwrap_err().field(), "penalties[1]");
    }

    #[test]
    fn bonus_above_max_is_rejected() {
        let mut raw = inputs();
        raw.bonuses = vec![MAX_ADJUSTMENT + dec!(1)];
        assert_eq!(BudgetFactors::try_from(raw).unwrap_err().field(), "bonuses[0]");
    }
}
