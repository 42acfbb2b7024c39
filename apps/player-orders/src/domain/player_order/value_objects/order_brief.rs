//! The descriptive part of a player order.

use serde::Serialize;
use std::collections::BTreeSet;

use super::TemplateCode;
use crate::domain::order_guarantee::RiskLevel;
use crate::domain::player_order::errors::PlayerOrderError;
use crate::domain::shared::{FactionId, Timestamp, ZoneId};

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 120;

/// Title, description and targeting of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBrief {
    title: String,
    description: String,
    template_code: Option<TemplateCode>,
    zone_ids: BTreeSet<ZoneId>,
    faction_ids: BTreeSet<FactionId>,
    risk_level: RiskLevel,
    deadline: Option<Timestamp>,
}

impl OrderBrief {
    /// Create a brief with the given title and nothing else.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBrief` if the title is blank or too long.
    pub fn new(title: impl Into<String>) -> Result<Self, PlayerOrderError> {
        let title = validate_title(title.into())?;
        Ok(Self {
            title,
            description: String::new(),
            template_code: None,
            zone_ids: BTreeSet::new(),
            faction_ids: BTreeSet::new(),
            risk_level: RiskLevel::default(),
            deadline: None,
        })
    }

    /// Replace the title.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBrief` if the title is blank or too long.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), PlayerOrderError> {
        self.title = validate_title(title.into())?;
        Ok(())
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set or clear the template the order was created from.
    pub const fn set_template_code(&mut self, code: Option<TemplateCode>) {
        self.template_code = code;
    }

    /// Replace target zones.
    pub fn set_zone_ids(&mut self, zones: impl IntoIterator<Item = ZoneId>) {
        self.zone_ids = zones.into_iter().collect();
    }

    /// Replace involved factions.
    pub fn set_faction_ids(&mut self, factions: impl IntoIterator<Item = FactionId>) {
        self.faction_ids = factions.into_iter().collect();
    }

    /// Replace the declared risk level.
    pub const fn set_risk_level(&mut self, level: RiskLevel) {
        self.risk_level = level;
    }

    /// Mutable access to the deadline, for patch application.
    pub const fn deadline_mut(&mut self) -> &mut Option<Timestamp> {
        &mut self.deadline
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source template.
    #[must_use]
    pub const fn template_code(&self) -> Option<TemplateCode> {
        self.template_code
    }

    /// Target zones.
    #[must_use]
    pub const fn zone_ids(&self) -> &BTreeSet<ZoneId> {
        &self.zone_ids
    }

    /// Involved factions.
    #[must_use]
    pub const fn faction_ids(&self) -> &BTreeSet<FactionId> {
        &self.faction_ids
    }

    /// Risk level declared by the issuer.
    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Completion deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }
}

fn validate_title(title: String) -> Result<String, PlayerOrderError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(PlayerOrderError::InvalidBrief {
            field: "title".to_string(),
            message: "must not be blank".to_string(),
        });
    }
    let chars = trimmed.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(PlayerOrderError::InvalidBrief {
            field: "title".to_string(),
            message: format!("{chars} characters exceeds the limit of {MAX_TITLE_CHARS}"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_title() {
        let brief = OrderBrief::new("  Escort the convoy ").unwrap();
        assert_eq!(brief.title(), "Escort the convoy");
        assert_eq!(brief.risk_level(), RiskLevel::Low);
        assert!(brief.deadline().is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            OrderBrief::new("   "),
            Err(PlayerOrderError::InvalidBrief { .. })
        ));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(OrderBrief::new(title).is_err());
        assert!(OrderBrief::new("x".repeat(MAX_TITLE_CHARS)).is_ok());
    }

    #[test]
    fn setters_replace_sets() {
        let mut brief = OrderBrief::new("Scout").unwrap();
        brief.set_zone_ids([ZoneId::new("watson"), ZoneId::new("watson")]);
        brief.set_faction_ids([FactionId::new("tyger-claws")]);
        assert_eq!(brief.zone_ids().len(), 1);
        assert_eq!(brief.faction_ids().len(), 1);
        *brief.deadline_mut() = Some(Timestamp::now());
        assert!(brief.deadline().is_some());
    }
}
