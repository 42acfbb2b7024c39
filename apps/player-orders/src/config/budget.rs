//! Budget and guarantee pricing configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::order_budget::BudgetPolicy;
use crate::domain::order_guarantee::GuaranteePricing;

/// Budget engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Currency code estimates are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Decimal places amounts are rounded to.
    #[serde(default = "default_minor_units")]
    pub minor_units: u32,
    /// Service commission rate.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            minor_units: default_minor_units(),
            commission_rate: default_commission_rate(),
        }
    }
}

impl BudgetConfig {
    /// Engine policy for these settings.
    #[must_use]
    pub fn to_policy(&self) -> BudgetPolicy {
        BudgetPolicy {
            currency: self.currency.clone(),
            minor_units: self.minor_units,
            commission_rate: self.commission_rate,
        }
    }
}

fn default_currency() -> String {
    "eddies".to_string()
}

const fn default_minor_units() -> u32 {
    2
}

fn default_commission_rate() -> Decimal {
    dec!(0.08)
}

/// Escrow multiplier per policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowMultipliers {
    /// Standard escrow.
    #[serde(default = "default_standard_escrow")]
    pub standard: Decimal,
    /// Extended escrow.
    #[serde(default = "default_extended_escrow")]
    pub extended: Decimal,
    /// Premium escrow.
    #[serde(default = "default_premium_escrow")]
    pub premium: Decimal,
}

impl Default for EscrowMultipliers {
    fn default() -> Self {
        Self {
            standard: default_standard_escrow(),
            extended: default_extended_escrow(),
            premium: default_premium_escrow(),
        }
    }
}

fn default_standard_escrow() -> Decimal {
    dec!(1.00)
}

fn default_extended_escrow() -> Decimal {
    dec!(1.10)
}

fn default_premium_escrow() -> Decimal {
    dec!(1.25)
}

/// Insurance premium rate per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceRates {
    /// Basic cover.
    #[serde(default = "default_basic_insurance")]
    pub basic: Decimal,
    /// Extended cover.
    #[serde(default = "default_extended_insurance")]
    pub extended: Decimal,
    /// Premium cover.
    #[serde(default = "default_premium_insurance")]
    pub premium: Decimal,
}

impl Default for InsuranceRates {
    fn default() -> Self {
        Self {
            basic: default_basic_insurance(),
            extended: default_extended_insurance(),
            premium: default_premium_insurance(),
        }
    }
}

fn default_basic_insurance() -> Decimal {
    dec!(0.02)
}

fn default_extended_insurance() -> Decimal {
    dec!(0.04)
}

fn default_premium_insurance() -> Decimal {
    dec!(0.07)
}

/// Guarantee pricing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuaranteesConfig {
    /// Escrow multipliers.
    #[serde(default)]
    pub escrow: EscrowMultipliers,
    /// Insurance rates.
    #[serde(default)]
    pub insurance: InsuranceRates,
}

impl GuaranteesConfig {
    /// Selector pricing, rounding like the budget.
    #[must_use]
    pub fn to_pricing(&self, minor_units: u32) -> GuaranteePricing {
        GuaranteePricing {
            standard_escrow: self.escrow.standard,
            extended_escrow: self.escrow.extended,
            premium_escrow: self.escrow.premium,
            basic_insurance: self.insurance.basic,
            extended_insurance: self.insurance.extended,
            premium_insurance: self.insurance.premium,
            minor_units,
        }
    }
}
