//! Risk intel from a static zone table.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::application::ports::{RiskIntelPort, UpstreamError};
use crate::domain::order_guarantee::{LegalStatus, RiskLevel, RiskProfile};
use crate::domain::player_order::OrderBrief;
use crate::domain::shared::{FactionId, ZoneId};

/// Risk assessment from configured zone legality and faction presence.
///
/// The worst zone a brief touches decides its legality. Risk is `extreme`
/// for extreme zones, `high` for illegal ones, `medium` for grey zones or
/// hostile presence, `low` otherwise.
#[derive(Debug, Clone, Default)]
pub struct StaticRiskIntel {
    illegal_zones: BTreeSet<ZoneId>,
    grey_zones: BTreeSet<ZoneId>,
    extreme_zones: BTreeSet<ZoneId>,
    hostile_factions: BTreeMap<ZoneId, BTreeSet<FactionId>>,
}

impl StaticRiskIntel {
    /// Intel that considers every zone legal and calm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark zones as illegal.
    #[must_use]
    pub fn with_illegal_zones(mut self, zones: impl IntoIterator<Item = ZoneId>) -> Self {
        self.illegal_zones.extend(zones);
        self
    }

    /// Mark zones as grey.
    #[must_use]
    pub fn with_grey_zones(mut self, zones: impl IntoIterator<Item = ZoneId>) -> Self {
        self.grey_zones.extend(zones);
        self
    }

    /// Mark zones as extreme risk.
    #[must_use]
    pub fn with_extreme_zones(mut self, zones: impl IntoIterator<Item = ZoneId>) -> Self {
        self.extreme_zones.extend(zones);
        self
    }

    /// Register factions hostile to work in `zone`.
    #[must_use]
    pub fn with_hostile_factions(
        mut self,
        zone: ZoneId,
        factions: impl IntoIterator<Item = FactionId>,
    ) -> Self {
        self.hostile_factions.entry(zone).or_default().extend(factions);
        self
    }

    /// Assess a brief synchronously.
    #[must_use]
    pub fn assess_brief(&self, brief: &OrderBrief) -> RiskProfile {
        let zones = brief.zone_ids();
        let touches = |set: &BTreeSet<ZoneId>| zones.iter().any(|z| set.contains(z));

        let legal_status = if touches(&self.illegal_zones) {
            LegalStatus::Illegal
        } else if touches(&self.grey_zones) {
            LegalStatus::Grey
        } else {
            LegalStatus::Legal
        };

        let hostile: BTreeSet<FactionId> = zones
            .iter()
            .filter_map(|z| self.hostile_factions.get(z))
            .flatten()
            .cloned()
            .collect();

        let risk_level = if touches(&self.extreme_zones) {
            RiskLevel::Extreme
        } else if legal_status == LegalStatus::Illegal {
            RiskLevel::High
        } else if legal_status == LegalStatus::Grey || !hostile.is_empty() {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        RiskProfile {
            risk_level,
            legal_status,
            hostile_factions: hostile,
            zone_ids: zones.clone(),
        }
    }
}

#[async_trait]
impl RiskIntelPort for StaticRiskIntel {
    async fn assess(&self, brief: &OrderBrief) -> Result<RiskProfile, UpstreamError> {
        Ok(self.assess_brief(brief))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intel() -> StaticRiskIntel {
        StaticRiskIntel::new()
            .with_illegal_zones([ZoneId::new("pacifica")])
            .with_grey_zones([ZoneId::new("watson")])
            .with_extreme_zones([ZoneId::new("combat-zone")])
            .with_hostile_factions(ZoneId::new("watson"), [FactionId::new("maelstrom")])
    }

    fn brief_in(zones: &[&str]) -> OrderBrief {
        let mut brief = OrderBrief::new("Recover the shard").unwrap();
        brief.set_zone_ids(zones.iter().map(|z| ZoneId::new(*z)));
        brief
    }

    #[test]
    fn calm_zone_is_low_and_legal() {
        let profile = intel().assess_brief(&brief_in(&["city-center"]));
        assert_eq!(profile.risk_level, RiskLevel::Low);
        assert_eq!(profile.legal_status, LegalStatus::Legal);
    }

    #[test]
    fn grey_zone_with_hostiles_is_medium() {
        let profile = intel().assess_brief(&brief_in(&["watson"]));
        assert_eq!(profile.risk_level, RiskLevel::Medium);
        assert_eq!(profile.legal_status, LegalStatus::Grey);
        assert!(profile.hostile_factions.contains(&FactionId::new("maelstrom")));
    }

    #[test]
    fn worst_zone_wins() {
        let profile = intel().assess_brief(&brief_in(&["watson", "pacifica"]));
        assert_eq!(profile.legal_status, LegalStatus::Illegal);
        assert_eq!(profile.risk_level, RiskLevel::High);

        let profile = intel().assess_brief(&brief_in(&["pacifica", "combat-zone"]));
        assert_eq!(profile.risk_level, RiskLevel::Extreme);
        assert_eq!(profile.zone_ids.len(), 2);
    }
}
