//! Per-user draft slots
//!
//! Every user gets one slot behind its own async mutex. Holding the guard
//! from [`SessionStore::lock`] serializes everything that user does, while
//! other users proceed in parallel.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio::time::interval;

use super::draft::Draft;

/// Exclusive access to one user's draft slot
pub type SessionGuard = OwnedMutexGuard<Option<Draft>>;

type Slot = Arc<Mutex<Option<Draft>>>;

/// In-memory draft storage keyed by Telegram user id.
#[derive(Default)]
pub struct SessionStore {
    slots: DashMap<i64, Slot>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and returns exclusive access to `user_id`'s slot.
    pub async fn lock(&self, user_id: i64) -> SessionGuard {
        // The shard lock must be released before awaiting the slot.
        let slot = {
            let entry = self.slots.entry(user_id).or_default();
            Arc::clone(entry.value())
        };
        slot.lock_owned().await
    }

    /// Copy of the user's draft, if any
    pub async fn get(&self, user_id: i64) -> Option<Draft> {
        self.lock(user_id).await.clone()
    }

    /// Stores `draft`, returning the draft it replaced
    pub async fn set(&self, user_id: i64, draft: Draft) -> Option<Draft> {
        self.lock(user_id).await.replace(draft)
    }

    /// Removes and returns the user's draft
    pub async fn delete(&self, user_id: i64) -> Option<Draft> {
        self.lock(user_id).await.take()
    }

    /// Number of slots currently tracked, idle ones included
    pub fn tracked_users(&self) -> usize {
        self.slots.len()
    }

    /// Drops slots that hold no draft and that nobody is using.
    ///
    /// Returns the number of slots removed.
    pub fn prune_idle(&self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(draft) => draft.is_some(),
                Err(_) => true,
            }
        });
        before.saturating_sub(self.slots.len())
    }

    /// Spawns a background task that calls [`prune_idle`](Self::prune_idle) every `every`.
    pub fn spawn_cleanup_task(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                let removed = self.prune_idle();
                if removed > 0 {
                    log::debug!("Pruned {} idle session slot(s), {} left", removed, self.tracked_users());
                }
            }
        })
    }
}
