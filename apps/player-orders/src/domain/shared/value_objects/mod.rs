//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod patch;
mod timestamp;

pub use identifiers::{FactionId, OrderId, ZoneId};
pub use money::Money;
pub use patch::Patch;
pub use timestamp::Timestamp;
