//! Persistence Adapters
//!
//! Implementations of the player order repository.

pub mod in_memory;

pub use in_memory::InMemoryPlayerOrderRepository;
