//! Application Services
//!
//! Services coordinate the domain with the driven ports. The lifecycle
//! service is the single entry point used by inbound adapters.

mod order_lifecycle;
mod order_locks;
mod validation_aggregator;

pub use order_lifecycle::{LifecycleCollaborators, LifecycleError, OrderLifecycleService};
pub use order_locks::OrderLocks;
pub use validation_aggregator::{DEFAULT_SOURCE_TIMEOUT, ValidationAborted, ValidationAggregator};
