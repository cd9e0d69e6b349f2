//! Request-level identity resolution and ability gating.

use std::sync::Arc;

use adboard_core::clock::Clock;
use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_entity::{Identity, SessionKind, SessionRecord};

use crate::rbac::PermissionResolver;
use crate::session::SessionStore;
use crate::token::TokenCodec;

/// Resolves the authenticated principal for an inbound request.
///
/// Supports two sources: a bearer access token (verified signature plus an
/// expiry check against the injected clock) and a server-side session record
/// (touched on every successful load). The HTTP extractor decides which
/// source a request carries.
#[derive(Clone)]
pub struct RequestAuthenticator {
    /// Access token verification.
    codec: Arc<TokenCodec>,
    /// Session record lookup.
    sessions: Arc<SessionStore>,
    /// Ability checks for gated surfaces.
    resolver: Arc<PermissionResolver>,
    /// Time source for the expiry check.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator").finish()
    }
}

impl RequestAuthenticator {
    /// Creates a new request authenticator.
    pub fn new(
        codec: Arc<TokenCodec>,
        sessions: Arc<SessionStore>,
        resolver: Arc<PermissionResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codec,
            sessions,
            resolver,
            clock,
        }
    }

    /// Verifies a bearer access token and returns the identity it proves.
    pub fn authenticate_bearer(&self, token: &str) -> AppResult<Identity> {
        let claims = self.codec.decode(token)?;
        if claims.is_expired(self.clock.now()) {
            return Err(AppError::unauthorized("Access token has expired"));
        }
        Ok(claims.identity())
    }

    /// Loads and touches the session record behind a session id.
    pub async fn authenticate_session(
        &self,
        kind: SessionKind,
        session_id: &str,
    ) -> AppResult<SessionRecord> {
        let mut record = self
            .sessions
            .load(kind, session_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
        self.sessions.touch(&mut record, self.clock.now()).await?;
        Ok(record)
    }

    /// Checks that the identity holds the given ability.
    pub async fn require_ability(&self, identity: &Identity, ability: &str) -> AppResult<()> {
        self.resolver
            .require(
                &identity.roles,
                identity.roles_version.unwrap_or(0),
                ability,
            )
            .await
    }
}
