//! # adboard-entity
//!
//! Domain entity models for Adboard. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod identity;
pub mod role;
pub mod session;
pub mod token;
pub mod user;

pub use identity::{Identity, IdentityView};
pub use role::{Permission, Role};
pub use session::{SessionKind, SessionRecord};
pub use token::{AccessToken, IssuedRefreshToken, RefreshTokenRecord, TokenPair};
pub use user::User;
