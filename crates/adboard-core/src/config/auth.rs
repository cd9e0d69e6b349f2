//! Authentication and token lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Authentication, token, and lockout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Keyed-hash algorithm for access tokens: `"sha256"`, `"sha384"`,
    /// or `"sha512"` (empty selects the default).
    #[serde(default = "default_token_algorithm")]
    pub token_algorithm: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Refresh token TTL in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
    /// Session record TTL in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Maximum failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
    /// Interval between expired-token purge sweeps, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
    /// Cookie contract for the HTTP boundary.
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_algorithm: default_token_algorithm(),
            access_ttl_seconds: default_access_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
            session_ttl_seconds: default_session_ttl(),
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
            cleanup_interval_seconds: default_cleanup_interval(),
            cookies: CookieConfig::default(),
        }
    }
}

/// Cookie names and attributes set by the HTTP boundary.
///
/// All cookies are HttpOnly and SameSite=Lax; the refresh cookie is
/// path-scoped to the refresh endpoint so browsers only attach it there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Name of the access-token cookie.
    #[serde(default = "default_access_cookie")]
    pub access_name: String,
    /// Name of the refresh-token cookie.
    #[serde(default = "default_refresh_cookie")]
    pub refresh_name: String,
    /// Path restriction for the refresh-token cookie.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Name of the session-id cookie.
    #[serde(default = "default_session_cookie")]
    pub session_name: String,
    /// Whether cookies carry the Secure attribute (disable for local HTTP).
    #[serde(default = "default_secure")]
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: default_access_cookie(),
            refresh_name: default_refresh_cookie(),
            refresh_path: default_refresh_path(),
            session_name: default_session_cookie(),
            secure: default_secure(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_algorithm() -> String {
    "sha256".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    1_209_600
}

fn default_session_ttl() -> u64 {
    86_400
}

fn default_max_failed() -> i32 {
    5
}

fn default_lockout() -> u64 {
    15
}

fn default_cleanup_interval() -> u64 {
    3600
}

fn default_access_cookie() -> String {
    "access_token".to_string()
}

fn default_refresh_cookie() -> String {
    "refresh_token".to_string()
}

fn default_refresh_path() -> String {
    "/api/auth/refresh".to_string()
}

fn default_session_cookie() -> String {
    "adboard_session".to_string()
}

fn default_secure() -> bool {
    true
}
