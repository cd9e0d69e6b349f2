//! Refresh-token repository implementation.
//!
//! All lookups are keyed by the one-way token hash; plaintext tokens never
//! reach this layer. Revocations are single-row conditional updates so that
//! two racing rotations of the same token can never both succeed.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use adboard_core::error::{AppError, ErrorKind};
use adboard_core::result::AppResult;
use adboard_entity::token::RefreshTokenRecord;

/// Repository for persisted refresh tokens.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new token record.
    pub async fn insert(&self, record: &RefreshTokenRecord) -> AppResult<RefreshTokenRecord> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "INSERT INTO refresh_tokens (id, token_hash, user_id, family_id, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(record.id)
        .bind(&record.token_hash)
        .bind(record.user_id)
        .bind(record.family_id)
        .bind(record.expires_at)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to persist refresh token", e)
        })
    }

    /// Find a token record by hash, revoked or not.
    ///
    /// Revoked records are intentionally returned so callers can treat a
    /// replayed token as a reuse signal rather than a miss.
    pub async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<RefreshTokenRecord>> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT * FROM refresh_tokens WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
        })
    }

    /// Conditionally revoke a token by hash. Returns `false` if it was
    /// already revoked or does not exist.
    pub async fn revoke_by_hash(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Conditionally revoke a token by id, optionally recording its
    /// rotation successor. Returns `false` if it was already revoked.
    pub async fn revoke_by_id(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        replaced_by: Option<Uuid>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2, replaced_by = $3 \
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .bind(replaced_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live token in a family. Returns the number revoked.
    pub async fn revoke_family(&self, family_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE family_id = $1 AND revoked_at IS NULL",
        )
        .bind(family_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke token family", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Delete expired and revoked token records. Returns the number removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1 OR revoked_at IS NOT NULL")
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to purge refresh tokens", e)
                })?;
        Ok(result.rows_affected())
    }
}
