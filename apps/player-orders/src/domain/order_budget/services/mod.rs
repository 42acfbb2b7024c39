//! Budget domain services.

mod budget_engine;

pub use budget_engine::{BudgetEngine, BudgetPolicy};
