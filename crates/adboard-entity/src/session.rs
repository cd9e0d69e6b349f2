//! Server-side session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::identity::Identity;
use crate::token::TokenPair;

/// The area a browser session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Public site session.
    Public,
    /// Admin panel session.
    Admin,
}

impl SessionKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = adboard_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "admin" => Ok(Self::Admin),
            _ => Err(adboard_core::AppError::validation(format!(
                "Invalid session kind: '{s}'. Expected one of: public, admin"
            ))),
        }
    }
}

/// Per-browser session state, keyed by (session id, kind).
///
/// Written on login, cleared on logout, touched on authenticated access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier from the session cookie.
    pub session_id: String,
    /// Which area the session belongs to.
    pub kind: SessionKind,
    /// The authenticated identity.
    pub identity: Identity,
    /// The token pair issued to this session.
    pub tokens: TokenPair,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
    /// Last authenticated access.
    pub last_seen_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Refresh the last-seen timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = now;
    }
}
