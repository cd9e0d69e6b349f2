//! Periodic removal of expired and revoked refresh tokens.

use std::sync::Arc;

use tracing::info;

use adboard_core::Clock;
use adboard_core::result::AppResult;

use super::store::RefreshTokenStore;

/// Sweeps dead refresh tokens out of the store.
///
/// Reuse detection only needs revoked records until their family is
/// fully rotated out, so the sweep can run at a coarse interval.
#[derive(Clone)]
pub struct TokenCleanup {
    /// Store to purge.
    store: Arc<dyn RefreshTokenStore>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCleanup").finish()
    }
}

impl TokenCleanup {
    /// Creates a new cleanup handler.
    pub fn new(store: Arc<dyn RefreshTokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Runs one sweep, returning the number of records removed.
    pub async fn run(&self) -> AppResult<u64> {
        let purged = self.store.purge_expired(self.clock.now()).await?;
        if purged > 0 {
            info!(purged, "Purged expired refresh tokens");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::hash::hash_token;
    use crate::token::memory::MemoryRefreshTokenStore;
    use adboard_core::clock::FixedClock;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_sweep_removes_only_dead_records() {
        let store = Arc::new(MemoryRefreshTokenStore::new());
        let now = Utc::now();
        let clock = Arc::new(FixedClock::new(now));

        let user = Uuid::new_v4();
        let dead = adboard_entity::RefreshTokenRecord::mint(
            hash_token("dead"),
            user,
            now - Duration::seconds(1),
            None,
            now - Duration::days(14),
        );
        let live = adboard_entity::RefreshTokenRecord::mint(
            hash_token("live"),
            user,
            now + Duration::days(14),
            None,
            now,
        );
        store.persist(&dead).await.unwrap();
        store.persist(&live).await.unwrap();

        let cleanup = TokenCleanup::new(store.clone(), clock);
        assert_eq!(cleanup.run().await.unwrap(), 1);
        assert_eq!(cleanup.run().await.unwrap(), 0);
        assert!(store.find(&live.token_hash).await.unwrap().is_some());
    }
}
