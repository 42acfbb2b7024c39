//! HTTP request types not shared with the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::player_order::PlayerOrderStatus;

/// Query string for listing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersQuery {
    /// Status to filter by.
    pub status: PlayerOrderStatus,
}
