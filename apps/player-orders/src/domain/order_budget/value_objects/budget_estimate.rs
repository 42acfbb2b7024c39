//! Budget estimate produced by the engine.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::shared::Money;

/// Intermediate values of a budget computation, kept for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetBreakdown {
    /// Sum of complexity weights.
    pub effective_complexity: Decimal,
    /// `effective_complexity * market_index`.
    pub base: Money,
    /// `base * risk_modifier`.
    pub risk_adjusted: Money,
    /// `risk_adjusted * time_modifier`.
    pub time_adjusted: Money,
    /// Sum of bonuses.
    pub bonus_sum: Money,
    /// Sum of penalties.
    pub penalty_sum: Money,
    /// `time_adjusted + bonus_sum - penalty_sum` before the zero floor.
    pub unclamped: Money,
}

/// Final price of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEstimate {
    /// Rounded, non-negative price.
    pub estimate: Money,
    /// Service commission on the estimate, rounded the same way.
    pub commission: Money,
    /// Currency code the amounts are expressed in.
    pub currency: String,
    /// True when penalties pushed the raw total below zero.
    pub floored: bool,
    /// Intermediate values.
    pub breakdown: BudgetBreakdown,
}
