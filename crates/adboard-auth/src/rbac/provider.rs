//! Role definitions behind a storage-agnostic interface.

use async_trait::async_trait;

use adboard_core::result::AppResult;
use adboard_database::repositories::RoleRepository;
use adboard_entity::role::{Permission, Role};

/// Source of role definitions and the permission catalog.
#[async_trait]
pub trait RoleProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Fetches roles matching the given canonical keys. Unknown keys are
    /// simply absent from the result.
    async fn find_by_keys(&self, keys: &[String]) -> AppResult<Vec<Role>>;

    /// Lists every role.
    async fn list(&self) -> AppResult<Vec<Role>>;

    /// Lists the permission catalog.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Replaces the permission set of a role, returning the updated role.
    async fn update_permissions(&self, role_key: &str, permissions: &[String]) -> AppResult<Role>;
}

#[async_trait]
impl RoleProvider for RoleRepository {
    async fn find_by_keys(&self, keys: &[String]) -> AppResult<Vec<Role>> {
        RoleRepository::find_by_keys(self, keys).await
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        RoleRepository::list(self).await
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        RoleRepository::list_permissions(self).await
    }

    async fn update_permissions(&self, role_key: &str, permissions: &[String]) -> AppResult<Role> {
        RoleRepository::update_permissions(self, role_key, permissions).await
    }
}
