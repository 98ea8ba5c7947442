//! Per-game mutual exclusion
//!
//! An update reads a game, runs extraction, and writes the merged result back.
//! Two updates of the same game must not interleave, so each one holds the
//! game's lock for the whole read-merge-write.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Lazily created async mutex per game id
#[derive(Clone, Default)]
pub struct GameLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one game
    pub async fn acquire(&self, game_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(game_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry of a deleted game
    pub async fn forget(&self, game_id: Uuid) {
        self.inner.lock().await.remove(&game_id);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_game_is_exclusive() {
        let locks = GameLocks::new();
        let id = Uuid::new_v4();

        let guard = locks.acquire(id).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished(), "second holder must wait");

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_games_do_not_block() {
        let locks = GameLocks::new();
        let _a = locks.acquire(Uuid::new_v4()).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(Uuid::new_v4())).await;
        assert!(b.is_ok());
        assert_eq!(locks.len().await, 2);
    }

    #[tokio::test]
    async fn test_forget_removes_entry() {
        let locks = GameLocks::new();
        let id = Uuid::new_v4();
        drop(locks.acquire(id).await);
        locks.forget(id).await;
        assert_eq!(locks.len().await, 0);
    }
}
