//! Role repository implementation.

use sqlx::PgPool;

use adboard_core::error::{AppError, ErrorKind};
use adboard_core::result::AppResult;
use adboard_entity::role::{Permission, Role};

/// Column list shared by every role query; `member_count` is computed.
const ROLE_COLUMNS: &str = "r.id, r.key, r.name, r.description, r.permissions, \
     (SELECT COUNT(*) FROM users u WHERE r.key = ANY(u.roles)) AS member_count, \
     r.created_at, r.updated_at";

/// Repository for role and permission lookups.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch roles matching the given canonical keys. Unknown keys are
    /// simply absent from the result.
    pub async fn find_by_keys(&self, keys: &[String]) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles r WHERE r.key = ANY($1)"
        ))
        .bind(keys.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find roles", e))
    }

    /// List all roles.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles r ORDER BY r.key ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    /// List all known permissions.
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT key, label FROM permissions ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list permissions", e)
            })
    }

    /// Replace a role's permission set. Returns the updated role.
    pub async fn update_permissions(
        &self,
        role_key: &str,
        permissions: &[String],
    ) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(&format!(
            "UPDATE roles r SET permissions = $2, updated_at = NOW() \
             WHERE r.key = $1 RETURNING {ROLE_COLUMNS}"
        ))
        .bind(role_key)
        .bind(permissions.to_vec())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update role permissions", e)
        })?
        .ok_or_else(|| AppError::validation(format!("Unknown role: '{role_key}'")))
    }
}
