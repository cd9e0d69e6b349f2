//! `CurrentIdentity` extractor — authenticates the request via bearer
//! token or session cookie and injects the resolved identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use adboard_core::error::AppError;
use adboard_entity::{Identity, SessionKind};

use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
///
/// Resolution order: `Authorization: Bearer` first, then the public
/// session cookie. A present but invalid bearer token fails the request
/// rather than falling through to the cookie.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl std::ops::Deref for CurrentIdentity {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if let Some(token) = bearer {
            let identity = state.authenticator.authenticate_bearer(token.trim())?;
            return Ok(Self(identity));
        }

        let session_cookie = &state.config.auth.cookies.session_name;
        if let Some(session_id) = cookies::read_cookie(&parts.headers, session_cookie) {
            let record = state
                .authenticator
                .authenticate_session(SessionKind::Public, &session_id)
                .await?;
            return Ok(Self(record.identity));
        }

        Err(AppError::unauthorized("Unauthorized").into())
    }
}
