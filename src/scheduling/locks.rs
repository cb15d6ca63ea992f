use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::HallId;

/// Per-hall async locks so the availability read and the write that follows
/// happen without another booking of the same hall interleaving.
///
/// Clones share the same set of locks.
#[derive(Debug, Clone, Default)]
pub struct HallLocks {
    enabled: bool,
    locks: Arc<Mutex<HashMap<HallId, Arc<Mutex<()>>>>>,
}

impl HallLocks {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::default(),
        }
    }

    /// Waits for exclusive access to `hall`. Returns `None` when disabled.
    pub async fn acquire(&self, hall: HallId) -> Option<OwnedMutexGuard<()>> {
        if !self.enabled {
            return None;
        }

        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(hall).or_default().clone()
        };

        Some(lock.lock_owned().await)
    }
}
