//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use adboard_core::error::{AppError, ErrorKind};
use adboard_core::result::AppResult;
use adboard_entity::user::User;

/// Repository for user lookups and login bookkeeping.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Increment the failed-login counter; returns the new count.
    pub async fn increment_failed_attempts(&self, user_id: Uuid) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE users SET failed_login_attempts = failed_login_attempts + 1, \
             updated_at = NOW() WHERE id = $1 RETURNING failed_login_attempts",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record login failure", e)
        })
    }

    /// Lock the account until the given instant.
    pub async fn lock_until(&self, user_id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE users SET locked_until = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(until)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock account", e))?;
        Ok(())
    }

    /// Record a successful login: reset lockout bookkeeping, stamp last_login_at.
    pub async fn record_login(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET failed_login_attempts = 0, locked_until = NULL, \
             last_login_at = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record login", e))?;
        Ok(())
    }

    /// Bump the roles-version of every user holding the given role key.
    ///
    /// Invalidates those users' cached permission expansions on their next
    /// token issue.
    pub async fn bump_roles_version_for_role(&self, role_key: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE users SET roles_version = roles_version + 1, updated_at = NOW() \
             WHERE $1 = ANY(roles)",
        )
        .bind(role_key)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump roles version", e)
        })?;
        Ok(result.rows_affected())
    }
}
