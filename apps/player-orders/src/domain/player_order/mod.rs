//! Player Order Bounded Context
//!
//! The player-issued contract and its lifecycle.
//!
//! # Components
//!
//! - `aggregate`: `PlayerOrder` aggregate root
//! - `value_objects`: `PlayerOrderStatus`, `OrderBrief`, `PlayerOrderTemplate`, `Publication`
//! - `services`: `OrderStateMachine`
//! - `events`: `OrderEvent`
//! - `repository`: `PlayerOrderRepository` port

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{MAX_CANCEL_REASON_CHARS, OrderBudget, OrderGuarantees, PlayerOrder};
pub use errors::PlayerOrderError;
pub use events::OrderEvent;
pub use repository::PlayerOrderRepository;
pub use services::OrderStateMachine;
pub use value_objects::{
    OrderBrief, PlayerOrderStatus, PlayerOrderTemplate, Publication, TemplateCode,
};
