//! Claims payload embedded in every signed access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adboard_entity::{Identity, User};

/// Access token claims.
///
/// Expiry is carried in the claims but never enforced during decoding;
/// callers compare `exp` against their own clock so that stale tokens
/// still decode for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// Role keys at the time of issuance.
    pub roles: Vec<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Roles version for permission cache keying, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rv: Option<i64>,
}

impl Claims {
    /// Builds claims for a user authenticated at `now`.
    pub fn for_user(user: &User, now: DateTime<Utc>, ttl_seconds: u64) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::seconds(ttl_seconds as i64)).timestamp(),
            rv: Some(user.roles_version),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Checks whether this token has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Converts the claims into the identity they describe.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            email: self.email.clone(),
            roles: self.roles.clone(),
            roles_version: self.rv,
        }
    }
}
