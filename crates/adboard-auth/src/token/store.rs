//! Refresh token persistence behind a storage-agnostic interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use adboard_core::result::AppResult;
use adboard_database::repositories::RefreshTokenRepository;
use adboard_entity::RefreshTokenRecord;

/// Storage interface for refresh tokens.
///
/// The interface deals exclusively in token hashes; plaintext tokens are
/// hashed by the caller before any lookup or write reaches a store.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persists a freshly minted record.
    async fn persist(&self, record: &RefreshTokenRecord) -> AppResult<RefreshTokenRecord>;

    /// Looks up a record by token hash.
    ///
    /// Revoked records are returned rather than filtered so that a
    /// replayed token reads as reuse, not as a miss.
    async fn find(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>>;

    /// Revokes the record with this hash if it is not already revoked.
    /// Returns whether a live record was revoked.
    async fn revoke(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool>;

    /// Revokes a record by id, recording its replacement when rotating.
    ///
    /// Conditional on the record still being live: returns `false` when it
    /// was already revoked or missing, so racing rotations resolve to
    /// exactly one winner.
    async fn revoke_by_id(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        replaced_by: Option<Uuid>,
    ) -> AppResult<bool>;

    /// Revokes every live token in the given family. Returns the count.
    async fn revoke_family(&self, family_id: Uuid, now: DateTime<Utc>) -> AppResult<u64>;

    /// Removes expired and revoked records. Returns the count removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn persist(&self, record: &RefreshTokenRecord) -> AppResult<RefreshTokenRecord> {
        self.insert(record).await
    }

    async fn find(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>> {
        self.find_by_hash(token_hash).await
    }

    async fn revoke(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool> {
        self.revoke_by_hash(token_hash, now).await
    }

    async fn revoke_by_id(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        replaced_by: Option<Uuid>,
    ) -> AppResult<bool> {
        RefreshTokenRepository::revoke_by_id(self, id, now, replaced_by).await
    }

    async fn revoke_family(&self, family_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        RefreshTokenRepository::revoke_family(self, family_id, now).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        RefreshTokenRepository::purge_expired(self, now).await
    }
}
