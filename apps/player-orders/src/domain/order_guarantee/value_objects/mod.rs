//! Guarantee value objects.

mod guarantee_quote;
mod guarantee_selection;
mod risk_profile;

pub use guarantee_quote::GuaranteeQuote;
pub use guarantee_selection::{
    EscrowPolicy, GuaranteeSelection, InsuranceTier, MAX_PERFORMANCE_BONUS,
};
pub use risk_profile::{LegalStatus, RiskLevel, RiskProfile};
