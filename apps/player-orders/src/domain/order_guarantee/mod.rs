//! Order Guarantee Bounded Context
//!
//! Escrow and insurance terms proportional to an order's risk.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{GuaranteeError, GuaranteeRule};
pub use services::{GuaranteePricing, GuaranteeSelector};
pub use value_objects::{
    EscrowPolicy, GuaranteeQuote, GuaranteeSelection, InsuranceTier, LegalStatus, RiskLevel,
    RiskProfile, MAX_PERFORMANCE_BONUS,
};
