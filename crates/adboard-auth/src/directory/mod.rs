//! User lookups and login bookkeeping behind a storage-agnostic interface.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use adboard_core::result::AppResult;
use adboard_database::repositories::UserRepository;
use adboard_entity::User;

pub use memory::MemoryUserDirectory;

/// Read and bookkeeping operations on the user population.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Lookup by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Marks a successful login: clears the failure counter and lockout
    /// and stamps `last_login_at`.
    async fn record_login(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()>;

    /// Bumps the failed-login counter, returning the new count.
    async fn increment_failed_attempts(&self, user_id: Uuid) -> AppResult<i32>;

    /// Locks the account until the given time.
    async fn lock_until(&self, user_id: Uuid, until: DateTime<Utc>) -> AppResult<()>;

    /// Advances the roles version of every user holding the given role,
    /// changing their permission-cache keys. Returns the number of users
    /// touched.
    async fn bump_roles_version_for_role(&self, role_key: &str) -> AppResult<u64>;
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn record_login(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        UserRepository::record_login(self, user_id, now).await
    }

    async fn increment_failed_attempts(&self, user_id: Uuid) -> AppResult<i32> {
        UserRepository::increment_failed_attempts(self, user_id).await
    }

    async fn lock_until(&self, user_id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        UserRepository::lock_until(self, user_id, until).await
    }

    async fn bump_roles_version_for_role(&self, role_key: &str) -> AppResult<u64> {
        UserRepository::bump_roles_version_for_role(self, role_key).await
    }
}
