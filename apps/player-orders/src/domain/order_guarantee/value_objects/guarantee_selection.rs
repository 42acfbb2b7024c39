//! Contractual guarantees chosen for an order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::order_budget::MAX_ADJUSTMENT;
use crate::domain::order_guarantee::errors::GuaranteeError;
use crate::domain::shared::Money;

/// Largest performance bonus an order may promise.
pub const MAX_PERFORMANCE_BONUS: Money = Money::new(MAX_ADJUSTMENT);

/// How the reward is held until completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowPolicy {
    /// Reward held until completion.
    Standard,
    /// Reward plus a surplus held, released in stages.
    Extended,
    /// Arbiter-backed escrow with the largest hold.
    Premium,
}

impl EscrowPolicy {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for EscrowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insurance coverage against order failure.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceTier {
    /// No coverage.
    #[default]
    #[serde(rename = "none")]
    Uninsured,
    /// Partial refund on failure.
    Basic,
    /// Full refund on failure.
    Extended,
    /// Full refund plus damages.
    Premium,
}

impl InsuranceTier {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninsured => "none",
            Self::Basic => "basic",
            Self::Extended => "extended",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for InsuranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escrow and insurance terms attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuaranteeSelection {
    escrow_policy: EscrowPolicy,
    insurance_tier: InsuranceTier,
    reputation_bond: bool,
    performance_bonus: Money,
}

impl GuaranteeSelection {
    /// Create a selection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGuaranteeTerms` if `performance_bonus` is negative or
    /// above [`MAX_PERFORMANCE_BONUS`].
    pub fn try_new(
        escrow_policy: EscrowPolicy,
        insurance_tier: InsuranceTier,
        reputation_bond: bool,
        performance_bonus: Money,
    ) -> Result<Self, GuaranteeError> {
        if performance_bonus.is_negative() {
            return Err(GuaranteeError::InvalidGuaranteeTerms {
                field: "performance_bonus".to_string(),
                message: format!("{performance_bonus} must not be negative"),
            });
        }
        if performance_bonus > MAX_PERFORMANCE_BONUS {
            return Err(GuaranteeError::InvalidGuaranteeTerms {
                field: "performance_bonus".to_string(),
                message: format!("{performance_bonus} exceeds the limit of {MAX_PERFORMANCE_BONUS}"),
            });
        }
        Ok(Self {
            escrow_policy,
            insurance_tier,
            reputation_bond,
            performance_bonus,
        })
    }

    /// Escrow only: no insurance, no bond, no bonus.
    #[must_use]
    pub const fn escrow_only(escrow_policy: EscrowPolicy) -> Self {
        Self {
            escrow_policy,
            insurance_tier: InsuranceTier::Uninsured,
            reputation_bond: false,
            performance_bonus: Money::ZERO,
        }
    }

    /// Replace the insurance tier.
    #[must_use]
    pub const fn with_insurance(mut self, tier: InsuranceTier) -> Self {
        self.insurance_tier = tier;
        self
    }

    /// Attach a reputation bond.
    #[must_use]
    pub const fn with_reputation_bond(mut self) -> Self {
        self.reputation_bond = true;
        self
    }

    /// Escrow policy.
    #[must_use]
    pub const fn escrow_policy(&self) -> EscrowPolicy {
        self.escrow_policy
    }

    /// Insurance tier.
    #[must_use]
    pub const fn insurance_tier(&self) -> InsuranceTier {
        self.insurance_tier
    }

    /// Whether the issuer stakes reputation on the order.
    #[must_use]
    pub const fn reputation_bond(&self) -> bool {
        self.reputation_bond
    }

    /// Extra payout on successful completion.
    #[must_use]
    pub const fn performance_bonus(&self) -> Money {
        self.performance_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_bonus_is_rejected() {
        let err = GuaranteeSelection::try_new(
            EscrowPolicy::Standard,
            InsuranceTier::Uninsured,
            false,
            Money::new(dec!(-1)),
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_GUARANTEE_TERMS");
    }

    #[test]
    fn bonus_above_limit_is_rejected() {
        let over = MAX_PERFORMANCE_BONUS.checked_add(Money::new(dec!(0.01))).unwrap();
        let err = GuaranteeSelection::try_new(
            EscrowPolicy::Standard,
            InsuranceTier::Uninsured,
            false,
            over,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GuaranteeError::InvalidGuaranteeTerms { ref field, .. } if field == "performance_bonus"
        ));
        assert!(
            GuaranteeSelection::try_new(
                EscrowPolicy::Standard,
                InsuranceTier::Uninsured,
                false,
                MAX_PERFORMANCE_BONUS,
            )
            .is_ok()
        );
    }

    #[test]
    fn builders_compose() {
        let selection = GuaranteeSelection::escrow_only(EscrowPolicy::Premium)
            .with_insurance(InsuranceTier::Basic)
            .with_reputation_bond();
        assert_eq!(selection.escrow_policy(), EscrowPolicy::Premium);
        assert_eq!(selection.insurance_tier(), InsuranceTier::Basic);
        assert!(selection.reputation_bond());
        assert_eq!(selection.performance_bonus(), Money::ZERO);
    }

    #[test]
    fn uninsured_is_none_on_the_wire() {
        assert_eq!(serde_json::to_string(&InsuranceTier::Uninsured).unwrap(), "\"none\"");
        let tier: InsuranceTier = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(tier, InsuranceTier::Uninsured);
        assert_eq!(InsuranceTier::default(), InsuranceTier::Uninsured);
    }
}
