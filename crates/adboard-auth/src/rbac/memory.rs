//! In-memory role provider for tests and single-node use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_entity::role::{Permission, Role};

use super::provider::RoleProvider;

/// Role provider backed by a mutex-guarded map keyed by role key.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleProvider {
    /// Roles keyed by canonical key.
    roles: Arc<Mutex<HashMap<String, Role>>>,
    /// Known permission catalog.
    permissions: Arc<Mutex<Vec<Permission>>>,
}

impl MemoryRoleProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a role definition from its key and permissions.
    pub async fn insert(&self, key: &str, permissions: Vec<String>) {
        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            key: key.to_string(),
            name: key.to_string(),
            description: None,
            permissions,
            member_count: 0,
            created_at: now,
            updated_at: now,
        };
        let mut roles = self.roles.lock().await;
        roles.insert(role.key.clone(), role);
    }

    /// Replaces the permission catalog.
    pub async fn set_catalog(&self, catalog: Vec<Permission>) {
        let mut permissions = self.permissions.lock().await;
        *permissions = catalog;
    }
}

#[async_trait]
impl RoleProvider for MemoryRoleProvider {
    async fn find_by_keys(&self, keys: &[String]) -> AppResult<Vec<Role>> {
        let roles = self.roles.lock().await;
        Ok(keys
            .iter()
            .filter_map(|key| roles.get(key).cloned())
            .collect())
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        let roles = self.roles.lock().await;
        let mut all: Vec<Role> = roles.values().cloned().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(all)
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.lock().await;
        Ok(permissions.clone())
    }

    async fn update_permissions(&self, role_key: &str, permissions: &[String]) -> AppResult<Role> {
        let mut roles = self.roles.lock().await;
        let role = roles
            .get_mut(role_key)
            .ok_or_else(|| AppError::validation(format!("Unknown role: '{role_key}'")))?;
        role.permissions = permissions.to_vec();
        role.updated_at = Utc::now();
        Ok(role.clone())
    }
}
