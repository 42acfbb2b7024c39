//! Budget value objects.

mod budget_estimate;
mod budget_factors;
mod complexity_factor;

pub use budget_estimate::{BudgetBreakdown, BudgetEstimate};
pub use budget_factors::{
    BudgetFactors, FactorInputs, MAX_ADJUSTMENT, MAX_LIST_LEN, MAX_MARKET_INDEX, MAX_MODIFIER,
    MIN_MODIFIER,
};
pub use complexity_factor::{ComplexityFactor, MAX_FACTOR_WEIGHT};
