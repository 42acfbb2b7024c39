//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer.
//! Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: Player order repository
//!   - `upstream/`: Domain validators, risk intel, market index, templates
//!   - `events/`: Event publishing
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - **Wiring**: `config/` builds the service from configuration

pub mod config;
pub mod events;
pub mod http;
pub mod persistence;
pub mod upstream;
