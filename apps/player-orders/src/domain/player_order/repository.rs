//! Player Order Repository Trait
//!
//! Persistence abstraction for player orders, implemented by infrastructure
//! adapters. Completed and cancelled orders are archived: they stay readable
//! by ID but no longer appear in status queries for active orders.

use async_trait::async_trait;

use super::aggregate::PlayerOrder;
use super::errors::PlayerOrderError;
use super::value_objects::PlayerOrderStatus;
use crate::domain::shared::OrderId;

/// Repository trait for player order persistence.
#[async_trait]
pub trait PlayerOrderRepository: Send + Sync {
    /// Save an order (insert or update). Terminal orders are moved to the archive.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails or the order is already archived.
    async fn save(&self, order: &PlayerOrder) -> Result<(), PlayerOrderError>;

    /// Find an active or archived order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<PlayerOrder>, PlayerOrderError>;

    /// Find all orders with a given status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_status(
        &self,
        status: PlayerOrderStatus,
    ) -> Result<Vec<PlayerOrder>, PlayerOrderError>;

    /// Count active (non-archived) orders.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn count_active(&self) -> Result<usize, PlayerOrderError>;
}
