//! # adboard-auth
//!
//! Authentication and token lifecycle for the Adboard platform.
//!
//! ## Modules
//!
//! - `token` — signed access tokens plus opaque, rotating refresh tokens
//! - `password` — Argon2id password hashing and verification
//! - `directory` — user lookups and login bookkeeping
//! - `rbac` — role to permission expansion and ability checks
//! - `session` — opaque per-browser session records
//! - `manager` — login, refresh, and logout orchestration
//! - `authenticator` — request authentication for the HTTP layer

pub mod authenticator;
pub mod directory;
pub mod manager;
pub mod password;
pub mod rbac;
pub mod session;
pub mod token;

pub use authenticator::RequestAuthenticator;
pub use directory::{MemoryUserDirectory, UserDirectory};
pub use manager::{AuthManager, AuthOutcome, LoginCommand, LogoutCommand, RefreshCommand};
pub use password::PasswordHasher;
pub use rbac::{MemoryRoleProvider, PermissionResolver, RoleProvider};
pub use session::SessionStore;
pub use token::{Claims, MemoryRefreshTokenStore, RefreshTokenStore, TokenCleanup, TokenCodec};
