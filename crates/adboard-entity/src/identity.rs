//! Authenticated principal view types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// Immutable per-request view of an authenticated principal.
///
/// Built from decoded token claims or from a session record; never persisted
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user id.
    pub user_id: Uuid,
    /// The user's email address.
    pub email: String,
    /// Role keys, in assignment order.
    pub roles: Vec<String>,
    /// Roles-version counter carried from the user row, when known.
    /// Keys the cached permission expansion.
    pub roles_version: Option<i64>,
}

impl Identity {
    /// Public JSON projection of this identity.
    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.user_id,
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            roles_version: Some(user.roles_version),
        }
    }
}

/// Stable JSON shape consumed by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityView {
    /// User id.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Role keys.
    pub roles: Vec<String>,
}
