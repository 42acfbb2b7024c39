//! Application Layer
//!
//! The application layer orchestrates domain logic for the player order lifecycle.
//! It defines:
//!
//! - **Ports**: Interfaces for validators, risk intel, market index and templates
//! - **Services**: Validation fan-out and the lifecycle controller
//! - **DTOs**: Data transfer objects for API boundaries

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
