//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use adboard_auth::directory::UserDirectory;
use adboard_auth::manager::AuthManager;
use adboard_auth::rbac::{PermissionResolver, RoleProvider};
use adboard_auth::session::SessionStore;
use adboard_auth::RequestAuthenticator;
use adboard_cache::CacheManager;
use adboard_core::clock::Clock;
use adboard_core::config::AppConfig;
use adboard_database::connection::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool; absent when the API runs over
    /// in-memory stores (tests, local tooling)
    pub db: Option<DatabasePool>,
    /// Cache manager backing sessions and permission expansions
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, refresh, and logout orchestration
    pub auth: Arc<AuthManager>,
    /// Per-request credential verification (bearer tokens, sessions)
    pub authenticator: Arc<RequestAuthenticator>,
    /// Browser session records
    pub sessions: Arc<SessionStore>,
    /// Role-to-permission expansion and ability checks
    pub permissions: Arc<PermissionResolver>,
    /// Role catalog backing the admin endpoints
    pub roles: Arc<dyn RoleProvider>,
    /// User lookups for role administration side effects
    pub directory: Arc<dyn UserDirectory>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}
