//! Role and permission entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named role grouping a set of permission keys.
///
/// Role keys are canonical upper-case (`"ADMIN"`, `"MODERATOR"`); lookups
/// normalize their input before comparing. Roles are mutable: editing the
/// permission set invalidates cached expansions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Canonical upper-case role key.
    pub key: String,
    /// Human-readable role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Granted permission keys (dotted namespace, e.g. `admin.users.manage`).
    pub permissions: Vec<String>,
    /// Advisory count of users currently holding this role.
    pub member_count: i64,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Check whether this role grants a permission key.
    ///
    /// The key is expected to be normalized (trimmed, lower-cased) already.
    pub fn grants(&self, permission_key: &str) -> bool {
        self.permissions.iter().any(|p| p == permission_key)
    }
}

/// A known permission key with its display label.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Globally unique dotted key, e.g. `admin.listings.moderate`.
    pub key: String,
    /// Human-readable label.
    pub label: String,
}
