//! Response payloads for the auth and admin endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adboard_auth::AuthOutcome;
use adboard_entity::role::{Permission, Role};
use adboard_entity::IdentityView;

/// Success envelope wrapping every JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `"ok"`.
    pub status: String,
    /// Endpoint payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Token issuance payload returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub expires_at: DateTime<Utc>,
    /// Opaque refresh token (returned exactly once).
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// Authenticated identity.
    pub user: IdentityView,
}

impl From<&AuthOutcome> for TokenResponse {
    fn from(outcome: &AuthOutcome) -> Self {
        Self {
            access_token: outcome.tokens.access.token.clone(),
            expires_at: outcome.tokens.access.expires_at,
            refresh_token: outcome.tokens.refresh.token.clone(),
            refresh_expires_at: outcome.tokens.refresh.expires_at,
            user: outcome.identity.view(),
        }
    }
}

/// Logout acknowledgement. Not enveloped; logout always succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always `true`.
    pub ok: bool,
}

/// Role summary for the admin role listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleView {
    /// Role id.
    pub id: uuid::Uuid,
    /// Stable role key (e.g. `ADMIN`).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Permission keys granted by the role.
    pub permissions: Vec<String>,
    /// Number of users holding the role.
    pub member_count: i64,
}

impl From<Role> for RoleView {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            key: role.key,
            name: role.name,
            description: role.description,
            permissions: role.permissions,
            member_count: role.member_count,
        }
    }
}

/// Known permission with its human-readable label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionView {
    /// Permission key (e.g. `admin.users.manage`).
    pub key: String,
    /// Display label.
    pub label: String,
}

impl From<Permission> for PermissionView {
    fn from(permission: Permission) -> Self {
        Self {
            key: permission.key,
            label: permission.label,
        }
    }
}

/// Role catalog payload for GET /api/admin/roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCatalogResponse {
    /// All roles with their permission sets.
    pub roles: Vec<RoleView>,
    /// Every assignable permission.
    pub permissions: Vec<PermissionView>,
}

/// Service health payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database probe result.
    pub database: String,
    /// Cache probe result.
    pub cache: String,
}
