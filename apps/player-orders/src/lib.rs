// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Player Orders - Rust Core Library
//!
//! Player-issued contracts: pricing, guarantees, cross-domain validation and
//! the publication lifecycle.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_budget`: Factor model and budget engine
//!   - `order_guarantee`: Risk profiles, guarantee selection and pricing
//!   - `order_validation`: Issues, summaries and the social rules
//!   - `player_order`: Player order aggregate and status lifecycle
//!
//! - **Application**: Orchestration
//!   - `ports`: Interfaces for external systems (`DomainValidatorPort`, `RiskIntelPort`)
//!   - `services`: `ValidationAggregator`, `OrderLifecycleService`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: REST API
//!   - `persistence`: In-memory order repository
//!   - `upstream`: HTTP and static domain validators, risk intel, market index, templates
//!   - `events`: Event publishing
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Structured logging and Prometheus metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_budget::{BudgetEngine, BudgetEstimate, BudgetFactors, FactorError};
pub use domain::order_guarantee::{
    GuaranteeError, GuaranteeQuote, GuaranteeSelection, GuaranteeSelector, RiskLevel, RiskProfile,
};
pub use domain::order_validation::{ValidationIssue, ValidationSource, ValidationSummary};
pub use domain::player_order::{PlayerOrder, PlayerOrderError, PlayerOrderStatus};
pub use domain::shared::{Money, OrderId, Timestamp};

// Application re-exports
pub use application::ports::{DomainValidatorPort, EventPublisherPort, NoOpEventPublisher};
pub use application::services::{LifecycleError, OrderLifecycleService, ValidationAggregator};

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::InMemoryPlayerOrderRepository;
