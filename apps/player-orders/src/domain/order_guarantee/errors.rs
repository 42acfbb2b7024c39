//! Guarantee errors.

use std::fmt;

/// A risk-floor rule a guarantee selection must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuaranteeRule {
    /// Illegal orders need premium escrow and a reputation bond.
    IllegalNeedsPremiumEscrowAndBond,
    /// Extreme-risk orders need some insurance.
    ExtremeNeedsInsurance,
}

impl GuaranteeRule {
    /// Stable rule identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IllegalNeedsPremiumEscrowAndBond => "ILLEGAL_REQUIRES_PREMIUM_ESCROW_AND_BOND",
            Self::ExtremeNeedsInsurance => "EXTREME_REQUIRES_INSURANCE",
        }
    }

    /// Terms the rule requires.
    #[must_use]
    pub const fn required_terms(&self) -> &'static str {
        match self {
            Self::IllegalNeedsPremiumEscrowAndBond => {
                "escrow_policy=premium and reputation_bond=true"
            }
            Self::ExtremeNeedsInsurance => "insurance_tier other than none",
        }
    }

    /// What the client should change.
    #[must_use]
    pub const fn remediation(&self) -> &'static str {
        match self {
            Self::IllegalNeedsPremiumEscrowAndBond => {
                "Select premium escrow and post a reputation bond for illegal orders"
            }
            Self::ExtremeNeedsInsurance => {
                "Add insurance (basic or higher) or lower the order's risk level"
            }
        }
    }
}

impl fmt::Display for GuaranteeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors raised by guarantee selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuaranteeError {
    /// The requested terms are weaker than the order's risk requires.
    BelowRiskFloor {
        /// First rule the request violates.
        rule: GuaranteeRule,
    },

    /// A term value is malformed.
    InvalidGuaranteeTerms {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },
}

impl GuaranteeError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BelowRiskFloor { .. } => "GUARANTEE_BELOW_RISK_FLOOR",
            Self::InvalidGuaranteeTerms { .. } => "INVALID_GUARANTEE_TERMS",
        }
    }

    /// Suggested fix, when one exists.
    #[must_use]
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::BelowRiskFloor { rule } => Some(rule.remediation()),
            Self::InvalidGuaranteeTerms { .. } => None,
        }
    }
}

impl fmt::Display for GuaranteeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowRiskFloor { rule } => {
                write!(
                    f,
                    "Guarantee below risk floor [{rule}]: requires {}",
                    rule.required_terms()
                )
            }
            Self::InvalidGuaranteeTerms { field, message } => {
                write!(f, "Invalid guarantee term '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for GuaranteeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_display_names_rule_and_terms() {
        let err = GuaranteeError::BelowRiskFloor {
            rule: GuaranteeRule::ExtremeNeedsInsurance,
        };
        let msg = err.to_string();
        assert!(msg.contains("EXTREME_REQUIRES_INSURANCE"));
        assert!(msg.contains("insurance_tier"));
        assert_eq!(err.code(), "GUARANTEE_BELOW_RISK_FLOOR");
        assert!(err.remediation().is_some());
    }

    #[test]
    fn invalid_terms_has_no_remediation() {
        let err = GuaranteeError::InvalidGuaranteeTerms {
            field: "performance_bonus".into(),
            message: "negative".into(),
        };
        assert!(err.remediation().is_none());
        assert!(err.to_string().contains("performance_bonus"));
    }
}
