//! Authentication handlers: login, refresh, logout, and identity echo.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use adboard_auth::{LoginCommand, LogoutCommand, RefreshCommand};
use adboard_core::config::auth::AuthConfig;
use adboard_entity::{IdentityView, SessionKind, SessionRecord};

use crate::cookies;
use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LogoutResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::CurrentIdentity;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let outcome = state
        .auth
        .login(LoginCommand {
            email: payload.email,
            password: payload.password,
            client_ip: client_ip(&headers),
        })
        .await?;

    // Mint the browser session backing cookie-based access.
    let session_id = Uuid::new_v4().to_string();
    let now = state.clock.now();
    state
        .sessions
        .save(&SessionRecord {
            session_id: session_id.clone(),
            kind: SessionKind::Public,
            identity: outcome.identity.clone(),
            tokens: outcome.tokens.clone(),
            created_at: now,
            last_seen_at: now,
        })
        .await?;

    let issued = cookies::issue_cookies(&state.config.auth, &outcome.tokens, &session_id);
    let response_headers = cookies::set_cookie_headers(&issued)?;

    Ok((
        response_headers,
        Json(ApiResponse::ok(TokenResponse::from(&outcome))),
    ))
}

/// POST /api/auth/refresh
///
/// The browser session record is left untouched here; it is rewritten
/// on login and cleared on logout, while rotation only swaps cookies.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let body_token = payload.and_then(|Json(body)| body.refresh_token);
    let presented = resolve_refresh_token(&state.config.auth, &headers, body_token.as_deref())
        .unwrap_or_default();

    let outcome = state.auth.refresh(RefreshCommand { presented }).await?;

    let rotated = cookies::rotate_cookies(&state.config.auth, &outcome.tokens);
    let response_headers = cookies::set_cookie_headers(&rotated)?;

    Ok((
        response_headers,
        Json(ApiResponse::ok(TokenResponse::from(&outcome))),
    ))
}

/// POST /api/auth/logout
///
/// Idempotent: always acknowledges, whether or not a token was found.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<LogoutRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let body_token = payload.and_then(|Json(body)| body.refresh_token);
    let presented = resolve_refresh_token(&state.config.auth, &headers, body_token.as_deref());

    state.auth.logout(LogoutCommand { presented }).await?;

    if let Some(session_id) =
        cookies::read_cookie(&headers, &state.config.auth.cookies.session_name)
    {
        if let Err(error) = state.sessions.clear(SessionKind::Public, &session_id).await {
            tracing::warn!(%error, "Failed to clear session during logout");
        }
    }

    let cleared = cookies::clear_cookies(&state.config.auth);
    let response_headers = cookies::set_cookie_headers(&cleared)?;

    Ok((response_headers, Json(LogoutResponse { ok: true })))
}

/// GET /api/auth/me
pub async fn me(identity: CurrentIdentity) -> Json<ApiResponse<IdentityView>> {
    Json(ApiResponse::ok(identity.view()))
}

/// Resolve the refresh token from cookie, body, or header, in that order.
/// Empty candidates are skipped so a blank cookie does not shadow a body
/// token.
fn resolve_refresh_token(
    config: &AuthConfig,
    headers: &HeaderMap,
    body_token: Option<&str>,
) -> Option<String> {
    cookies::read_cookie(headers, &config.cookies.refresh_name)
        .or_else(|| {
            body_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
        })
        .or_else(|| {
            headers
                .get("x-refresh-token")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
        })
}

/// First hop of `X-Forwarded-For`, when present.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
