//! Per-order serialization.
//!
//! Every mutation of an order runs while holding that order's lock, so two
//! operations on the same order never interleave. Different orders never
//! contend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::shared::OrderId;

/// Registry of per-order async locks.
#[derive(Debug, Default)]
pub struct OrderLocks {
    locks: Mutex<HashMap<OrderId, Arc<AsyncMutex<()>>>>,
}

impl OrderLocks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `order_id`.
    pub async fn lock(&self, order_id: &OrderId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            // Entries only referenced by the map have no holder or waiter.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(order_id.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of orders with a live lock entry.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.locks.lock().len()
    }
}
