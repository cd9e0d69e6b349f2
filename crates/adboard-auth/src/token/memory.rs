//! In-memory refresh token store for tests and single-node use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use adboard_core::result::AppResult;
use adboard_entity::RefreshTokenRecord;

use super::store::RefreshTokenStore;

/// Refresh token store backed by a mutex-guarded map keyed by token hash.
///
/// The single lock gives racing rotations exactly one winner, matching
/// the conditional-update discipline of the database-backed store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenStore {
    /// Records keyed by token hash.
    records: Arc<Mutex<HashMap<String, RefreshTokenRecord>>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records, revoked ones included.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Returns whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn persist(&self, record: &RefreshTokenRecord) -> AppResult<RefreshTokenRecord> {
        let mut records = self.records.lock().await;
        records.insert(record.token_hash.clone(), record.clone());
        Ok(record.clone())
    }

    async fn find(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let records = self.records.lock().await;
        Ok(records.get(token_hash).cloned())
    }

    async fn revoke(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        match records.get_mut(token_hash) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_by_id(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        replaced_by: Option<Uuid>,
    ) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        for record in records.values_mut() {
            if record.id == id && record.revoked_at.is_none() {
                record.revoked_at = Some(now);
                record.replaced_by = replaced_by;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn revoke_family(&self, family_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let mut count = 0u64;
        for record in records.values_mut() {
            if record.family_id == family_id && record.revoked_at.is_none() {
                record.revoked_at = Some(now);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at > now && record.revoked_at.is_none());
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::hash::hash_token;
    use chrono::Duration;

    fn minted(user_id: Uuid, family: Option<Uuid>, ttl: Duration) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord::mint(
            hash_token(&Uuid::new_v4().to_string()),
            user_id,
            now + ttl,
            family,
            now,
        )
    }

    #[tokio::test]
    async fn test_persist_then_find() {
        let store = MemoryRefreshTokenStore::new();
        let record = minted(Uuid::new_v4(), None, Duration::days(14));
        store.persist(&record).await.unwrap();

        let found = store.find(&record.token_hash).await.unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert_eq!(found.family_id, record.id);
    }

    #[tokio::test]
    async fn test_find_returns_revoked_records() {
        let store = MemoryRefreshTokenStore::new();
        let record = minted(Uuid::new_v4(), None, Duration::days(14));
        store.persist(&record).await.unwrap();
        assert!(store.revoke(&record.token_hash, Utc::now()).await.unwrap());

        let found = store.find(&record.token_hash).await.unwrap().unwrap();
        assert!(found.is_revoked());
    }

    #[tokio::test]
    async fn test_revoke_is_conditional() {
        let store = MemoryRefreshTokenStore::new();
        let record = minted(Uuid::new_v4(), None, Duration::days(14));
        store.persist(&record).await.unwrap();

        let now = Utc::now();
        assert!(store.revoke(&record.token_hash, now).await.unwrap());
        assert!(!store.revoke(&record.token_hash, now).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_by_id_records_replacement_once() {
        let store = MemoryRefreshTokenStore::new();
        let old = minted(Uuid::new_v4(), None, Duration::days(14));
        store.persist(&old).await.unwrap();

        let successor = Uuid::new_v4();
        let now = Utc::now();
        assert!(
            store
                .revoke_by_id(old.id, now, Some(successor))
                .await
                .unwrap()
        );
        assert!(
            !store
                .revoke_by_id(old.id, now, Some(Uuid::new_v4()))
                .await
                .unwrap()
        );

        let found = store.find(&old.token_hash).await.unwrap().unwrap();
        assert_eq!(found.replaced_by, Some(successor));
    }

    #[tokio::test]
    async fn test_revoke_family_leaves_other_families_alone() {
        let store = MemoryRefreshTokenStore::new();
        let user = Uuid::new_v4();
        let head = minted(user, None, Duration::days(14));
        let sibling = minted(user, Some(head.family_id), Duration::days(14));
        let other = minted(user, None, Duration::days(14));
        for record in [&head, &sibling, &other] {
            store.persist(record).await.unwrap();
        }

        let revoked = store.revoke_family(head.family_id, Utc::now()).await.unwrap();
        assert_eq!(revoked, 2);

        let untouched = store.find(&other.token_hash).await.unwrap().unwrap();
        assert!(!untouched.is_revoked());
    }

    #[tokio::test]
    async fn test_purge_removes_expired_and_revoked() {
        let store = MemoryRefreshTokenStore::new();
        let user = Uuid::new_v4();
        let expired = minted(user, None, Duration::seconds(-10));
        let revoked = minted(user, None, Duration::days(14));
        let live = minted(user, None, Duration::days(14));
        for record in [&expired, &revoked, &live] {
            store.persist(record).await.unwrap();
        }
        store.revoke(&revoked.token_hash, Utc::now()).await.unwrap();

        let now = Utc::now();
        assert_eq!(store.purge_expired(now).await.unwrap(), 2);
        assert_eq!(store.purge_expired(now).await.unwrap(), 0);
        assert!(store.find(&live.token_hash).await.unwrap().is_some());
        assert_eq!(store.len().await, 1);
    }
}
