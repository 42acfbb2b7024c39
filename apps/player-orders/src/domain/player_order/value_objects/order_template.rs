//! Order templates supplied by the content collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::order_guarantee::{EscrowPolicy, RiskLevel};

/// Template families offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCode {
    /// Protection, elimination, extraction.
    Combat,
    /// Netrunning and data theft.
    Hacker,
    /// Trade, courier and procurement work.
    Economy,
    /// Reputation and influence work.
    Social,
    /// Scouting and mapping.
    Exploration,
}

impl TemplateCode {
    /// Every template code.
    pub const ALL: [Self; 5] = [
        Self::Combat,
        Self::Hacker,
        Self::Economy,
        Self::Social,
        Self::Exploration,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Hacker => "hacker",
            Self::Economy => "economy",
            Self::Social => "social",
            Self::Exploration => "exploration",
        }
    }
}

impl fmt::Display for TemplateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults a new draft starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOrderTemplate {
    /// Template family.
    pub code: TemplateCode,
    /// Default title.
    pub title: String,
    /// Default description.
    pub description: String,
    /// Declared risk level.
    pub risk_level: RiskLevel,
    /// `(name, weight)` complexity factors.
    pub complexity_factors: Vec<(String, Decimal)>,
    /// Default risk modifier.
    pub risk_modifier: Decimal,
    /// Default time modifier.
    pub time_modifier: Decimal,
    /// Escrow policy suggested to the issuer.
    pub recommended_escrow: Option<EscrowPolicy>,
}
