//! Guarantee domain services.

mod guarantee_selector;

pub use guarantee_selector::{GuaranteePricing, GuaranteeSelector};
