//! In-memory user directory for tests and single-node use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_entity::User;

use super::UserDirectory;

/// User directory backed by a mutex-guarded map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    /// Users keyed by id.
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub async fn insert(&self, user: User) {
        let mut users = self.users.lock().await;
        users.insert(user.id, user);
    }

    /// Returns a snapshot of a user, for assertions.
    pub async fn get(&self, id: Uuid) -> Option<User> {
        let users = self.users.lock().await;
        users.get(&id).cloned()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn record_login(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::user_not_found("User not found"))?;
        user.failed_login_attempts = 0;
        user.locked_until = None;
        user.last_login_at = Some(now);
        user.updated_at = now;
        Ok(())
    }

    async fn increment_failed_attempts(&self, user_id: Uuid) -> AppResult<i32> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::user_not_found("User not found"))?;
        user.failed_login_attempts += 1;
        Ok(user.failed_login_attempts)
    }

    async fn lock_until(&self, user_id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::user_not_found("User not found"))?;
        user.locked_until = Some(until);
        Ok(())
    }

    async fn bump_roles_version_for_role(&self, role_key: &str) -> AppResult<u64> {
        let mut users = self.users.lock().await;
        let mut touched = 0u64;
        for user in users.values_mut() {
            if user.roles.iter().any(|role| role == role_key) {
                user.roles_version += 1;
                touched += 1;
            }
        }
        Ok(touched)
    }
}
