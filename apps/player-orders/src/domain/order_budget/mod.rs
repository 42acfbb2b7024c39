//! Order Budget Bounded Context
//!
//! Factor model and pricing engine for player orders.
//!
//! # Components
//!
//! - `value_objects`: `ComplexityFactor`, `BudgetFactors`, `BudgetEstimate`
//! - `services`: `BudgetEngine`
//! - `errors`: `FactorError`

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::FactorError;
pub use services::{BudgetEngine, BudgetPolicy};
pub use value_objects::{
    BudgetBreakdown, BudgetEstimate, BudgetFactors, ComplexityFactor, FactorInputs, MAX_ADJUSTMENT,
};
