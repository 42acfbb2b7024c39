//! In-memory template catalog.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::application::ports::{TemplateCatalogPort, UpstreamError};
use crate::domain::order_guarantee::{EscrowPolicy, RiskLevel};
use crate::domain::player_order::{PlayerOrderTemplate, TemplateCode};

/// Catalog holding templates in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateCatalog {
    templates: BTreeMap<TemplateCode, PlayerOrderTemplate>,
}

impl InMemoryTemplateCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with one starter template per family.
    #[must_use]
    pub fn with_defaults() -> Self {
        default_templates()
            .into_iter()
            .fold(Self::new(), Self::with_template)
    }

    /// Add or replace a template.
    #[must_use]
    pub fn with_template(mut self, template: PlayerOrderTemplate) -> Self {
        self.templates.insert(template.code, template);
        self
    }
}

#[async_trait]
impl TemplateCatalogPort for InMemoryTemplateCatalog {
    async fn find_template(
        &self,
        code: TemplateCode,
    ) -> Result<Option<PlayerOrderTemplate>, UpstreamError> {
        Ok(self.templates.get(&code).cloned())
    }

    async fn list_templates(&self) -> Result<Vec<PlayerOrderTemplate>, UpstreamError> {
        Ok(self.templates.values().cloned().collect())
    }
}

fn template(
    code: TemplateCode,
    title: &str,
    description: &str,
    risk_level: RiskLevel,
    factors: &[(&str, Decimal)],
    risk_modifier: Decimal,
    recommended_escrow: EscrowPolicy,
) -> PlayerOrderTemplate {
    PlayerOrderTemplate {
        code,
        title: title.to_string(),
        description: description.to_string(),
        risk_level,
        complexity_factors: factors
            .iter()
            .map(|(name, weight)| ((*name).to_string(), *weight))
            .collect(),
        risk_modifier,
        time_modifier: Decimal::ONE,
        recommended_escrow: Some(recommended_escrow),
    }
}

fn default_templates() -> Vec<PlayerOrderTemplate> {
    vec![
        template(
            TemplateCode::Combat,
            "Combat contract",
            "Protect, eliminate or extract a target",
            RiskLevel::High,
            &[("combat", dec!(4)), ("logistics", dec!(1))],
            dec!(1.4),
            EscrowPolicy::Extended,
        ),
        template(
            TemplateCode::Hacker,
            "Netrunning job",
            "Breach a subnet and retrieve or plant data",
            RiskLevel::Medium,
            &[("netrunning", dec!(4)), ("stealth", dec!(2))],
            dec!(1.2),
            EscrowPolicy::Standard,
        ),
        template(
            TemplateCode::Economy,
            "Procurement run",
            "Source and deliver goods",
            RiskLevel::Low,
            &[("logistics", dec!(2)), ("negotiation", dec!(1))],
            dec!(1.0),
            EscrowPolicy::Standard,
        ),
        template(
            TemplateCode::Social,
            "Influence campaign",
            "Shift a faction's standing or spread word",
            RiskLevel::Low,
            &[("negotiation", dec!(3))],
            dec!(0.8),
            EscrowPolicy::Standard,
        ),
        template(
            TemplateCode::Exploration,
            "Scouting survey",
            "Map a zone and report points of interest",
            RiskLevel::Medium,
            &[("navigation", dec!(2)), ("survival", dec!(2))],
            dec!(1.1),
            EscrowPolicy::Standard,
        ),
    ]
}
