//! Risk Intelligence Port (Driven Port)
//!
//! World and factions knowledge needed to assess an order's risk.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::order_guarantee::RiskProfile;
use crate::domain::player_order::OrderBrief;

/// Port for assessing the risk of a brief.
#[async_trait]
pub trait RiskIntelPort: Send + Sync {
    /// Assess the zones and factions a brief targets.
    async fn assess(&self, brief: &OrderBrief) -> Result<RiskProfile, UpstreamError>;
}
