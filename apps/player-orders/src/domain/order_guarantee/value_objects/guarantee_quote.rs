//! Priced guarantee terms.

use serde::Serialize;

use crate::domain::shared::Money;

/// Cost of an accepted guarantee selection against the current estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuaranteeQuote {
    /// Amount locked in escrow: estimate times the policy multiplier.
    pub escrow_hold: Money,
    /// Insurance premium charged to the issuer.
    pub insurance_premium: Money,
    /// Performance bonus promised on completion.
    pub performance_bonus: Money,
    /// Everything the issuer commits: hold, premium and bonus.
    pub total_commitment: Money,
}
