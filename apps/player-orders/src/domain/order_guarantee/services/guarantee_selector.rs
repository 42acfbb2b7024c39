//! Guarantee Selector
//!
//! Checks a requested [`GuaranteeSelection`] against a [`RiskProfile`] and
//! prices accepted terms. Rules are evaluated in a fixed order and the first
//! violation is reported. Non-compliant requests are rejected, never upgraded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::order_guarantee::errors::{GuaranteeError, GuaranteeRule};
use crate::domain::order_guarantee::value_objects::{
    EscrowPolicy, GuaranteeQuote, GuaranteeSelection, InsuranceTier, LegalStatus, RiskLevel,
    RiskProfile,
};
use crate::domain::shared::Money;

/// Rates used to price guarantees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuaranteePricing {
    /// Escrow multiplier for [`EscrowPolicy::Standard`].
    pub standard_escrow: Decimal,
    /// Escrow multiplier for [`EscrowPolicy::Extended`].
    pub extended_escrow: Decimal,
    /// Escrow multiplier for [`EscrowPolicy::Premium`].
    pub premium_escrow: Decimal,
    /// Premium rate for [`InsuranceTier::Basic`].
    pub basic_insurance: Decimal,
    /// Premium rate for [`InsuranceTier::Extended`].
    pub extended_insurance: Decimal,
    /// Premium rate for [`InsuranceTier::Premium`].
    pub premium_insurance: Decimal,
    /// Decimal places amounts are rounded to.
    pub minor_units: u32,
}

impl Default for GuaranteePricing {
    fn default() -> Self {
        Self {
            standard_escrow: dec!(1.00),
            extended_escrow: dec!(1.10),
            premium_escrow: dec!(1.25),
            basic_insurance: dec!(0.02),
            extended_insurance: dec!(0.04),
            premium_insurance: dec!(0.07),
            minor_units: 2,
        }
    }
}

impl GuaranteePricing {
    const fn escrow_multiplier(&self, policy: EscrowPolicy) -> Decimal {
        match policy {
            EscrowPolicy::Standard => self.standard_escrow,
            EscrowPolicy::Extended => self.extended_escrow,
            EscrowPolicy::Premium => self.premium_escrow,
        }
    }

    const fn insurance_rate(&self, tier: InsuranceTier) -> Decimal {
        match tier {
            InsuranceTier::Uninsured => Decimal::ZERO,
            InsuranceTier::Basic => self.basic_insurance,
            InsuranceTier::Extended => self.extended_insurance,
            InsuranceTier::Premium => self.premium_insurance,
        }
    }
}

/// Enforces risk floors on guarantees and prices them.
#[derive(Debug, Clone, Default)]
pub struct GuaranteeSelector {
    pricing: GuaranteePricing,
}

impl GuaranteeSelector {
    /// Create a selector with the given pricing.
    #[must_use]
    pub const fn new(pricing: GuaranteePricing) -> Self {
        Self { pricing }
    }

    /// Accept `requested` unchanged if it satisfies every risk floor.
    ///
    /// # Errors
    ///
    /// Returns `GuaranteeBelowRiskFloor` naming the first violated rule.
    pub fn select_guarantee(
        &self,
        risk: &RiskProfile,
        requested: &GuaranteeSelection,
    ) -> Result<GuaranteeSelection, GuaranteeError> {
        match Self::first_violation(risk, requested) {
            Some(rule) => Err(GuaranteeError::BelowRiskFloor { rule }),
            None => Ok(requested.clone()),
        }
    }

    /// True when `selection` satisfies every rule for `risk`.
    #[must_use]
    pub fn is_compliant(&self, risk: &RiskProfile, selection: &GuaranteeSelection) -> bool {
        Self::first_violation(risk, selection).is_none()
    }

    /// First rule `selection` breaks, in evaluation order.
    ///
    /// | order | applies when         | requires                           |
    /// |-------|----------------------|------------------------------------|
    /// | 1     | legal status illegal | premium escrow and reputation bond |
    /// | 2     | risk level extreme   | any insurance tier                 |
    ///
    /// Every applicable rule must hold. Meeting rule 1 does not exempt an
    /// illegal order from rule 2; "first" only decides which violation is
    /// reported.
    #[must_use]
    pub fn first_violation(
        risk: &RiskProfile,
        selection: &GuaranteeSelection,
    ) -> Option<GuaranteeRule> {
        if risk.legal_status == LegalStatus::Illegal
            && (selection.escrow_policy() != EscrowPolicy::Premium || !selection.reputation_bond())
        {
            return Some(GuaranteeRule::IllegalNeedsPremiumEscrowAndBond);
        }
        if risk.risk_level == RiskLevel::Extreme
            && selection.insurance_tier() == InsuranceTier::Uninsured
        {
            return Some(GuaranteeRule::ExtremeNeedsInsurance);
        }
        None
    }

    /// Price `selection` against `estimate`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGuaranteeTerms` if any amount overflows.
    pub fn quote(
        &self,
        estimate: Money,
        selection: &GuaranteeSelection,
    ) -> Result<GuaranteeQuote, GuaranteeError> {
        let minor_units = self.pricing.minor_units;
        let escrow_hold = estimate
            .checked_scale(self.pricing.escrow_multiplier(selection.escrow_policy()))
            .ok_or_else(|| overflow("escrow_hold"))?
            .round_to(minor_units);
        let insurance_premium = estimate
            .checked_scale(self.pricing.insurance_rate(selection.insurance_tier()))
            .ok_or_else(|| overflow("insurance_premium"))?
            .round_to(minor_units);
        let performance_bonus = selection.performance_bonus();
        let total_commitment = escrow_hold
            .checked_add(insurance_premium)
            .and_then(|sum| sum.checked_add(performance_bonus))
            .ok_or_else(|| overflow("total_commitment"))?;
        Ok(GuaranteeQuote {
            escrow_hold,
            insurance_premium,
            performance_bonus,
            total_commitment,
        })
    }
}

fn overflow(field: &str) -> GuaranteeError {
    GuaranteeError::InvalidGuaranteeTerms {
        field: field.to_string(),
        message: "amount exceeds the representable range".to_string(),
    }
}
