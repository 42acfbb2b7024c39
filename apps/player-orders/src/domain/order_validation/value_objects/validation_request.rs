//! Snapshot of a draft sent to every validation source.

use serde::Serialize;

use crate::domain::order_budget::BudgetEstimate;
use crate::domain::order_guarantee::{GuaranteeSelection, RiskProfile};
use crate::domain::player_order::value_objects::OrderBrief;
use crate::domain::shared::{OrderId, Timestamp};

/// Everything a domain validator needs to judge a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRequest {
    /// Order under validation.
    pub order_id: OrderId,
    /// Brief.
    pub brief: OrderBrief,
    /// Current estimate, if the budget has been computed.
    pub budget: Option<BudgetEstimate>,
    /// Current guarantees, if selected.
    pub guarantees: Option<GuaranteeSelection>,
    /// Freshly assessed risk profile.
    pub risk_profile: Option<RiskProfile>,
    /// When the pass started.
    pub requested_at: Timestamp,
}
