//! Ability resolution with cached role-to-permission expansion.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use adboard_cache::keys;
use adboard_cache::CacheManager;
use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_core::traits::CacheProvider;

use super::provider::RoleProvider;

/// How long a cached role expansion stays valid.
const EXPANSION_TTL: Duration = Duration::from_secs(300);

/// Resolves whether a set of role keys grants a named ability.
///
/// Role keys expand to the union of their permission sets through the
/// provider. Expansions are cached keyed on the sorted role keys plus the
/// caller's roles version, so a version bump reads past any stale entry
/// without waiting for the TTL.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Source of role definitions.
    provider: Arc<dyn RoleProvider>,
    /// Cache for expanded permission sets.
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish()
    }
}

impl PermissionResolver {
    /// Creates a new permission resolver.
    pub fn new(provider: Arc<dyn RoleProvider>, cache: Arc<CacheManager>) -> Self {
        Self { provider, cache }
    }

    /// Returns whether the given roles grant the ability.
    ///
    /// Role keys and abilities match case-insensitively. A blank ability or
    /// an empty role list always denies; unknown role keys are skipped.
    pub async fn is_granted(
        &self,
        roles: &[String],
        roles_version: i64,
        ability: &str,
    ) -> AppResult<bool> {
        let ability = ability.trim().to_lowercase();
        if ability.is_empty() {
            return Ok(false);
        }

        let roles = normalize_roles(roles);
        if roles.is_empty() {
            return Ok(false);
        }

        let granted = self.expand(&roles, roles_version).await?;
        Ok(granted.contains(&ability))
    }

    /// Checks and returns an error if the roles do not grant the ability.
    pub async fn require(
        &self,
        roles: &[String],
        roles_version: i64,
        ability: &str,
    ) -> AppResult<()> {
        if self.is_granted(roles, roles_version, ability).await? {
            return Ok(());
        }
        Err(AppError::forbidden(format!(
            "Missing required permission: {ability}"
        )))
    }

    /// Drops every cached expansion, across all versions and role sets.
    pub async fn invalidate(&self) -> AppResult<u64> {
        self.cache
            .delete_prefix(&keys::permission_set_prefix())
            .await
    }

    /// Expands normalized role keys into the union of their permissions.
    async fn expand(&self, roles: &[String], roles_version: i64) -> AppResult<BTreeSet<String>> {
        let cache_key = keys::permission_set(roles_version, roles);

        if let Ok(Some(cached)) = self.cache.get_json::<BTreeSet<String>>(&cache_key).await {
            return Ok(cached);
        }

        let mut granted = BTreeSet::new();
        for role in self.provider.find_by_keys(roles).await? {
            granted.extend(
                role.permissions
                    .iter()
                    .map(|permission| permission.trim().to_lowercase()),
            );
        }
        granted.remove("");

        if let Err(err) = self.cache.set_json(&cache_key, &granted, EXPANSION_TTL).await {
            debug!(error = %err, "Failed to cache permission expansion");
        }

        Ok(granted)
    }
}

/// Uppercases, deduplicates, and sorts role keys, dropping blanks.
fn normalize_roles(roles: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = roles
        .iter()
        .map(|role| role.trim().to_uppercase())
        .filter(|role| !role.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}
