//! Session record storage keyed by (kind, session id).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use adboard_cache::keys;
use adboard_cache::CacheManager;
use adboard_core::result::AppResult;
use adboard_core::traits::CacheProvider;
use adboard_entity::{SessionKind, SessionRecord};

/// Stores per-browser session records under kind-scoped cache keys.
///
/// Every write refreshes the TTL, so an active session slides forward while
/// an abandoned one expires on its own.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Backing cache.
    cache: Arc<CacheManager>,
    /// Session lifetime applied on every write.
    ttl: Duration,
}

impl SessionStore {
    /// Creates a session store with the given record lifetime.
    pub fn new(cache: Arc<CacheManager>, ttl_seconds: u64) -> Self {
        Self {
            cache,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Loads a session record, if present and unexpired.
    pub async fn load(
        &self,
        kind: SessionKind,
        session_id: &str,
    ) -> AppResult<Option<SessionRecord>> {
        self.cache.get_json(&keys::session(kind, session_id)).await
    }

    /// Writes a session record, refreshing its TTL.
    pub async fn save(&self, record: &SessionRecord) -> AppResult<()> {
        let key = keys::session(record.kind, &record.session_id);
        self.cache.set_json(&key, record, self.ttl).await
    }

    /// Stamps the last-seen time and rewrites the record.
    pub async fn touch(&self, record: &mut SessionRecord, now: DateTime<Utc>) -> AppResult<()> {
        record.touch(now);
        self.save(record).await
    }

    /// Removes a session record. Unknown ids are a no-op.
    pub async fn clear(&self, kind: SessionKind, session_id: &str) -> AppResult<()> {
        self.cache.delete(&keys::session(kind, session_id)).await
    }
}
