//! Role administration handlers.

use axum::extract::{Path, State};
use axum::Json;

use crate::dto::request::UpdateRolePermissionsRequest;
use crate::dto::response::{ApiResponse, PermissionView, RoleCatalogResponse, RoleView};
use crate::error::ApiError;
use crate::extractors::CurrentIdentity;
use crate::state::AppState;

/// GET /api/admin/roles
pub async fn list_roles(
    State(state): State<AppState>,
    identity: CurrentIdentity,
) -> Result<Json<ApiResponse<RoleCatalogResponse>>, ApiError> {
    state
        .authenticator
        .require_ability(&identity, "admin.access")
        .await?;
    state
        .authenticator
        .require_ability(&identity, "admin.roles.view")
        .await?;

    let roles = state
        .roles
        .list()
        .await?
        .into_iter()
        .map(RoleView::from)
        .collect();
    let permissions = state
        .roles
        .list_permissions()
        .await?
        .into_iter()
        .map(PermissionView::from)
        .collect();

    Ok(Json(ApiResponse::ok(RoleCatalogResponse {
        roles,
        permissions,
    })))
}

/// PUT /api/admin/roles/{key}/permissions
pub async fn update_role_permissions(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path(key): Path<String>,
    Json(payload): Json<UpdateRolePermissionsRequest>,
) -> Result<Json<ApiResponse<RoleView>>, ApiError> {
    state
        .authenticator
        .require_ability(&identity, "admin.access")
        .await?;
    state
        .authenticator
        .require_ability(&identity, "admin.roles.manage")
        .await?;

    let role = state
        .roles
        .update_permissions(&key, &payload.permissions)
        .await?;

    // Holders of this role must re-resolve their permissions on the
    // next request, and stale cached expansions must go with them.
    let users_bumped = state.directory.bump_roles_version_for_role(&role.key).await?;
    let entries_removed = state.permissions.invalidate().await?;

    tracing::info!(
        role = %role.key,
        users_bumped,
        entries_removed,
        "Role permissions updated"
    );

    Ok(Json(ApiResponse::ok(RoleView::from(role))))
}
