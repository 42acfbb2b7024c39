//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod domain_validator_port;
mod event_publisher_port;
mod market_index_port;
mod risk_intel_port;
mod template_catalog_port;
mod upstream_error;

pub use domain_validator_port::DomainValidatorPort;
pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
#[cfg(test)]
pub use market_index_port::MockMarketIndexPort;
pub use market_index_port::MarketIndexPort;
pub use risk_intel_port::RiskIntelPort;
pub use template_catalog_port::TemplateCatalogPort;
pub use upstream_error::UpstreamError;
