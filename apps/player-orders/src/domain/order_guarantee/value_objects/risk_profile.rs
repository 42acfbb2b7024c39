//! Risk profile supplied by the world and factions collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::shared::{FactionId, ZoneId};

/// Danger level of an order, ordered from safest to most dangerous.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Routine work.
    #[default]
    Low,
    /// Some exposure.
    Medium,
    /// Dangerous.
    High,
    /// Likely lethal; low success probability.
    Extreme,
}

impl RiskLevel {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legality of an order's objective in its target zones.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LegalStatus {
    /// Sanctioned work.
    #[default]
    Legal,
    /// Tolerated but unregulated.
    Grey,
    /// Outlawed in at least one target zone.
    Illegal,
}

impl LegalStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Grey => "grey",
            Self::Illegal => "illegal",
        }
    }
}

impl fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk assessment cached on a draft and refreshed on every validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Overall danger.
    pub risk_level: RiskLevel,
    /// Legality.
    pub legal_status: LegalStatus,
    /// Factions hostile to the order's objective.
    #[serde(default)]
    pub hostile_factions: BTreeSet<FactionId>,
    /// Zones the order touches.
    #[serde(default)]
    pub zone_ids: BTreeSet<ZoneId>,
}

impl RiskProfile {
    /// Profile with the given level and legality and no zone or faction data.
    #[must_use]
    pub const fn new(risk_level: RiskLevel, legal_status: LegalStatus) -> Self {
        Self {
            risk_level,
            legal_status,
            hostile_factions: BTreeSet::new(),
            zone_ids: BTreeSet::new(),
        }
    }

    /// Add a target zone.
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<ZoneId>) -> Self {
        self.zone_ids.insert(zone.into());
        self
    }

    /// Add a hostile faction.
    #[must_use]
    pub fn with_hostile_faction(mut self, faction: impl Into<FactionId>) -> Self {
        self.hostile_factions.insert(faction.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Extreme);
        assert_eq!(RiskLevel::Medium.max(RiskLevel::Extreme), RiskLevel::Extreme);
    }

    #[test]
    fn enums_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Extreme).unwrap(), "\"extreme\"");
        assert_eq!(serde_json::to_string(&LegalStatus::Grey).unwrap(), "\"grey\"");
        assert_eq!(LegalStatus::Illegal.to_string(), "illegal");
    }

    #[test]
    fn builder_collects_sets() {
        let profile = RiskProfile::new(RiskLevel::High, LegalStatus::Grey)
            .with_zone("watson")
            .with_zone("watson")
            .with_hostile_faction("maelstrom");
        assert_eq!(profile.zone_ids.len(), 1);
        assert!(profile.hostile_factions.contains(&FactionId::new("maelstrom")));
    }

    #[test]
    fn deserializes_without_sets() {
        let profile: RiskProfile =
            serde_json::from_str(r#"{"risk_level":"low","legal_status":"legal"}"#).unwrap();
        assert_eq!(profile, RiskProfile::default());
    }
}
