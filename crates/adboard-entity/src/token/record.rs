//! Persisted refresh-token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored refresh token.
///
/// Only the SHA-256 hash of the opaque token is persisted; the plaintext
/// value leaves the server exactly once, in the issuing response. Tokens
/// form rotation families: `family_id` stays constant across successive
/// rotations and equals the record's own `id` when it starts a chain.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// One-way hash of the opaque token (hex).
    pub token_hash: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Rotation family this token belongs to.
    pub family_id: Uuid,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Revocation instant; `None` while the token is live.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Successor record id set when this token was rotated.
    pub replaced_by: Option<Uuid>,
}

impl RefreshTokenRecord {
    /// Build a fresh record from a token hash.
    ///
    /// A `None` family starts a new rotation chain whose family id is the
    /// record's own id.
    pub fn mint(
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
        family_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            token_hash,
            user_id,
            family_id: family_id.unwrap_or(id),
            expires_at,
            created_at: now,
            revoked_at: None,
            replaced_by: None,
        }
    }

    /// Check whether the token has expired at the given instant.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check whether the token has been revoked.
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check whether the token is usable: neither revoked nor expired.
    #[inline]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}
