//! Per-row exclusive locks for the in-process store

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of one async mutex per row id.
///
/// Entries are created on first use and live as long as the registry; the
/// number of entries is bounded by the number of rows ever locked.
#[derive(Default)]
pub struct RowLocks {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

/// Exclusive hold on one row, released when dropped
#[derive(Debug)]
pub struct RowGuard {
    _guard: OwnedMutexGuard<()>,
}

impl RowLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to row `id`
    pub async fn acquire(&self, id: Uuid) -> RowGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        RowGuard {
            _guard: lock.lock_owned().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_row_is_exclusive() {
        let locks = Arc::new(RowLocks::new());
        let id = Uuid::new_v4();

        let guard = locks.acquire(id).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _row = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("lock was not released")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_rows_do_not_block() {
        let locks = RowLocks::new();
        let _first = locks.acquire(Uuid::new_v4()).await;
        let second =
            tokio::time::timeout(Duration::from_secs(1), locks.acquire(Uuid::new_v4())).await;
        assert!(second.is_ok());
    }
}
