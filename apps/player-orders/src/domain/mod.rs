//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`order_budget`]: Factor model and budget engine
//! - [`order_guarantee`]: Risk profiles, escrow/insurance selection and pricing
//! - [`order_validation`]: Validation issues, checklists and social rules
//! - [`player_order`]: Player order aggregate and lifecycle

pub mod order_budget;
pub mod order_guarantee;
pub mod order_validation;
pub mod player_order;
pub mod shared;
