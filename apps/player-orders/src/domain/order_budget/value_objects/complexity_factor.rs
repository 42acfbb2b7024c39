//! Complexity factor value object.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::domain::order_budget::errors::FactorError;

/// Largest weight a single complexity factor may carry.
pub const MAX_FACTOR_WEIGHT: Decimal = dec!(1000);

/// A named weight contributing to order difficulty.
///
/// Immutable: a changed weight means a new factor in a new
/// [`BudgetFactors`](super::BudgetFactors) snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityFactor {
    name: String,
    weight: Decimal,
}

impl ComplexityFactor {
    /// Create a factor, rejecting blank names and weights outside `[0, 1000]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFactorRange` naming `field` when validation fails.
    pub fn try_new(
        field: &str,
        name: impl Into<String>,
        weight: Decimal,
    ) -> Result<Self, FactorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FactorError::out_of_range(
                format!("{field}.name"),
                "must not be blank",
            ));
        }
        if weight < Decimal::ZERO || weight > MAX_FACTOR_WEIGHT {
            return Err(FactorError::out_of_range(
                format!("{field}.weight"),
                format!("{weight} must be within [0, {MAX_FACTOR_WEIGHT}]"),
            ));
        }
        Ok(Self { name, weight })
    }

    /// Factor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Factor weight.
    #[must_use]
    pub const fn weight(&self) -> Decimal {
        self.weight
    }
}
