//! Issued token value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issued signed access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw signed token string.
    pub token: String,
    /// Expiry carried in the token's claims.
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued opaque refresh token.
///
/// The `token` field is the only place the plaintext ever appears; the
/// store keeps a hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedRefreshToken {
    /// The opaque hex-encoded token string.
    pub token: String,
    /// Expiry of the backing store record.
    pub expires_at: DateTime<Utc>,
}

/// The pair of tokens returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// The signed access token.
    pub access: AccessToken,
    /// The opaque refresh token.
    pub refresh: IssuedRefreshToken,
}
