//! Request payloads for the auth and admin endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// POST /api/auth/login
///
/// Email format is not enforced here; the login flow normalizes the
/// address and treats unknown accounts identically to bad passwords,
/// so only emptiness is rejected up front.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email address.
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// POST /api/auth/refresh
///
/// The token may instead arrive via the refresh cookie or the
/// `X-Refresh-Token` header, so the body is optional end to end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Opaque refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POST /api/auth/logout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Opaque refresh token identifying the family to revoke.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// PUT /api/admin/roles/{key}/permissions
///
/// An empty list is allowed and strips the role of every permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRolePermissionsRequest {
    /// Replacement permission keys for the role.
    pub permissions: Vec<String>,
}
