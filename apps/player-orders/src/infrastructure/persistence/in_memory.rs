//! In-memory player order repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::player_order::{
    PlayerOrder, PlayerOrderError, PlayerOrderRepository, PlayerOrderStatus,
};
use crate::domain::shared::OrderId;

/// In-memory implementation of `PlayerOrderRepository`.
///
/// Completed and cancelled orders move from the active map to the archive on
/// save. Suitable for testing and development.
#[derive(Debug, Default)]
pub struct InMemoryPlayerOrderRepository {
    active: RwLock<HashMap<OrderId, PlayerOrder>>,
    archived: RwLock<HashMap<OrderId, PlayerOrder>>,
}

impl InMemoryPlayerOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of archived orders.
    #[must_use]
    pub fn archived_len(&self) -> usize {
        self.archived
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl PlayerOrderRepository for InMemoryPlayerOrderRepository {
    async fn save(&self, order: &PlayerOrder) -> Result<(), PlayerOrderError> {
        let mut archived = self
            .archived
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if archived.contains_key(order.id()) {
            return Err(PlayerOrderError::Persistence {
                message: format!("order {} is archived", order.id()),
            });
        }

        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        if order.status().is_terminal() {
            active.remove(order.id());
            archived.insert(order.id().clone(), order.clone());
        } else {
            active.insert(order.id().clone(), order.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<PlayerOrder>, PlayerOrderError> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(order) = active.get(id) {
            return Ok(Some(order.clone()));
        }
        drop(active);
        let archived = self.archived.read().unwrap_or_else(PoisonError::into_inner);
        Ok(archived.get(id).cloned())
    }

    async fn find_by_status(
        &self,
        status: PlayerOrderStatus,
    ) -> Result<Vec<PlayerOrder>, PlayerOrderError> {
        let source = if status.is_terminal() {
            &self.archived
        } else {
            &self.active
        };
        let orders = source.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<_> = orders
            .values()
            .filter(|o| o.status() == status)
            .cloned()
            .collect();
        found.sort_by_key(PlayerOrder::created_at);
        Ok(found)
    }

    async fn count_active(&self) -> Result<usize, PlayerOrderError> {
        Ok(self
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len())
    }
}
