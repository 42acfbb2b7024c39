//! Static risk intel and market index configuration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::player_order::TemplateCode;

/// Zone legality, faction presence and market indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskIntelConfig {
    /// Zones where the work is illegal.
    #[serde(default)]
    pub illegal_zones: Vec<String>,
    /// Zones with grey legality.
    #[serde(default)]
    pub grey_zones: Vec<String>,
    /// Zones rated extreme risk.
    #[serde(default)]
    pub extreme_zones: Vec<String>,
    /// Factions hostile to work in each zone.
    #[serde(default)]
    pub hostile_factions: BTreeMap<String, Vec<String>>,
    /// Market index used when none is given.
    #[serde(default = "default_market_index")]
    pub default_market_index: Decimal,
    /// Market index per template family.
    #[serde(default)]
    pub market_index_overrides: BTreeMap<TemplateCode, Decimal>,
}

impl Default for RiskIntelConfig {
    fn default() -> Self {
        Self {
            illegal_zones: Vec::new(),
            grey_zones: Vec::new(),
            extreme_zones: Vec::new(),
            hostile_factions: BTreeMap::new(),
            default_market_index: default_market_index(),
            market_index_overrides: BTreeMap::new(),
        }
    }
}

const fn default_market_index() -> Decimal {
    Decimal::TEN
}
