//! Login, refresh, and revocation protocols.
//!
//! The manager owns the three token lifecycle flows:
//!
//! 1. **Login** — verify credentials, start a fresh refresh-token family.
//! 2. **Refresh** — rotate a presented refresh token inside its family,
//!    detecting replay of revoked tokens.
//! 3. **Logout** — revoke the whole family; idempotent, never fails the
//!    caller.
//!
//! All timestamps come from the injected [`Clock`] so expiry and lockout
//! decisions are testable without sleeping.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use adboard_core::clock::Clock;
use adboard_core::config::auth::AuthConfig;
use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_entity::{
    AccessToken, Identity, IssuedRefreshToken, RefreshTokenRecord, TokenPair, User,
};

use crate::directory::UserDirectory;
use crate::password::PasswordHasher;
use crate::token::{generate_refresh_token, hash_token, Claims, RefreshTokenStore, TokenCodec};

/// Login request, built from a validated DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    /// Email address as submitted; normalized before lookup.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Client address for audit logging, when known.
    pub client_ip: Option<String>,
}

/// Refresh request carrying the presented opaque token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshCommand {
    /// The opaque refresh token as presented by the client.
    pub presented: String,
}

/// Logout request; the token is optional because logout is idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutCommand {
    /// The opaque refresh token, when the client presented one.
    pub presented: Option<String>,
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthOutcome {
    /// Freshly issued access and refresh tokens.
    pub tokens: TokenPair,
    /// The authenticated principal.
    pub identity: Identity,
}

/// Orchestrates login, token rotation, and revocation.
#[derive(Clone)]
pub struct AuthManager {
    /// User lookup and login bookkeeping.
    directory: Arc<dyn UserDirectory>,
    /// Refresh token persistence.
    tokens: Arc<dyn RefreshTokenStore>,
    /// Access token signing.
    codec: Arc<TokenCodec>,
    /// Credential verification.
    hasher: Arc<PasswordHasher>,
    /// Time source for every expiry and lockout decision.
    clock: Arc<dyn Clock>,
    /// TTLs and lockout thresholds.
    config: AuthConfig,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager").finish()
    }
}

impl AuthManager {
    /// Creates a new auth manager.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<dyn RefreshTokenStore>,
        codec: Arc<TokenCodec>,
        hasher: Arc<PasswordHasher>,
        clock: Arc<dyn Clock>,
        config: AuthConfig,
    ) -> Self {
        Self {
            directory,
            tokens,
            codec,
            hasher,
            clock,
            config,
        }
    }

    /// Authenticates credentials and issues a token pair in a new family.
    ///
    /// Absent user, wrong password, inactive account, and active lockout all
    /// surface as the same `InvalidCredentials` error; the absent-user path
    /// runs a dummy password verification so its timing matches the rest.
    pub async fn login(&self, command: LoginCommand) -> AppResult<AuthOutcome> {
        let now = self.clock.now();
        let email = command.email.trim().to_lowercase();

        let user = match self.directory.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.hasher.verify_dummy(&command.password);
                return Err(AppError::invalid_credentials("Invalid email or password"));
            }
        };

        if !user.can_login(now) {
            warn!(user_id = %user.id, "Login attempt on inactive or locked account");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        if !self
            .hasher
            .verify_password(&command.password, &user.password_hash)?
        {
            self.handle_failed_login(&user, now).await;
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        self.directory.record_login(user.id, now).await?;

        let outcome = self.issue_tokens(&user, None, now).await?;
        info!(
            user_id = %user.id,
            client_ip = command.client_ip.as_deref().unwrap_or("unknown"),
            "Login successful"
        );
        Ok(outcome)
    }

    /// Rotates a presented refresh token, returning a fresh pair.
    ///
    /// A replayed (already revoked) token revokes its entire family before
    /// failing; an expired token is revoked in place. A rotation that loses
    /// the conditional-revoke race fails without disturbing the winner, so
    /// a family never ends up with two live tokens.
    pub async fn refresh(&self, command: RefreshCommand) -> AppResult<AuthOutcome> {
        let now = self.clock.now();
        let presented = command.presented.trim();
        if presented.is_empty() {
            return Err(AppError::token_not_found("Refresh token not provided"));
        }

        let presented_hash = hash_token(presented);
        let record = self
            .tokens
            .find(&presented_hash)
            .await?
            .ok_or_else(|| AppError::token_not_found("Refresh token not found"))?;

        if record.is_revoked() {
            let revoked = self.tokens.revoke_family(record.family_id, now).await?;
            warn!(
                user_id = %record.user_id,
                family_id = %record.family_id,
                revoked,
                "Revoked refresh token presented again, token family revoked"
            );
            return Err(AppError::token_reused("Refresh token has already been used"));
        }

        if record.is_expired(now) {
            self.tokens.revoke(&presented_hash, now).await?;
            return Err(AppError::token_expired("Refresh token has expired"));
        }

        let user = self
            .directory
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found("Token owner no longer exists"))?;
        if !user.can_login(now) {
            warn!(user_id = %user.id, "Refresh attempt for inactive or locked account");
            return Err(AppError::user_not_found("Token owner no longer exists"));
        }

        let outcome = self.issue_tokens(&user, Some(&record), now).await?;
        info!(
            user_id = %user.id,
            family_id = %record.family_id,
            "Refresh token rotated"
        );
        Ok(outcome)
    }

    /// Revokes the family of a presented refresh token.
    ///
    /// Idempotent and deliberately error-swallowing: a missing, unknown, or
    /// already-revoked token and even a store failure all report success, so
    /// a client can always log out.
    pub async fn logout(&self, command: LogoutCommand) -> AppResult<()> {
        let presented = match command.presented.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => return Ok(()),
        };

        let now = self.clock.now();
        match self.tokens.find(&hash_token(&presented)).await {
            Ok(Some(record)) => {
                match self.tokens.revoke_family(record.family_id, now).await {
                    Ok(revoked) => {
                        info!(
                            user_id = %record.user_id,
                            family_id = %record.family_id,
                            revoked,
                            "Logout revoked refresh token family"
                        );
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to revoke token family during logout");
                    }
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Failed to look up refresh token during logout");
            }
        }

        Ok(())
    }

    /// Issues an access token and a refresh token for the user.
    ///
    /// With `rotated_from` set, the new refresh token joins that record's
    /// family and the old record is revoked first, pointing at its
    /// replacement. The conditional revoke admits exactly one winner per
    /// presented token; the loser fails as reuse.
    async fn issue_tokens(
        &self,
        user: &User,
        rotated_from: Option<&RefreshTokenRecord>,
        now: DateTime<Utc>,
    ) -> AppResult<AuthOutcome> {
        let claims = Claims::for_user(user, now, self.config.access_ttl_seconds);
        let access_token = self.codec.encode(&claims)?;

        let refresh_plain = generate_refresh_token()?;
        let expires_at = now + Duration::seconds(self.config.refresh_ttl_seconds as i64);
        let record = RefreshTokenRecord::mint(
            hash_token(&refresh_plain),
            user.id,
            expires_at,
            rotated_from.map(|old| old.family_id),
            now,
        );

        if let Some(old) = rotated_from {
            let won = self
                .tokens
                .revoke_by_id(old.id, now, Some(record.id))
                .await?;
            if !won {
                warn!(
                    user_id = %old.user_id,
                    family_id = %old.family_id,
                    "Lost refresh rotation race, request denied"
                );
                return Err(AppError::token_reused("Refresh token has already been used"));
            }
        }

        let record = self.tokens.persist(&record).await?;

        Ok(AuthOutcome {
            tokens: TokenPair {
                access: AccessToken {
                    token: access_token,
                    expires_at: claims.expires_at(),
                },
                refresh: IssuedRefreshToken {
                    token: refresh_plain,
                    expires_at: record.expires_at,
                },
            },
            identity: Identity::from(user),
        })
    }

    /// Counts a failed attempt and locks the account at the threshold.
    ///
    /// Bookkeeping failures are logged and dropped; the caller's
    /// `InvalidCredentials` response does not depend on them.
    async fn handle_failed_login(&self, user: &User, now: DateTime<Utc>) {
        let attempts = match self.directory.increment_failed_attempts(user.id).await {
            Ok(attempts) => attempts,
            Err(err) => {
                error!(user_id = %user.id, error = %err, "Failed to record login failure");
                return;
            }
        };

        if attempts >= self.config.max_failed_attempts {
            let until = now + Duration::minutes(self.config.lockout_duration_minutes as i64);
            if let Err(err) = self.directory.lock_until(user.id, until).await {
                error!(user_id = %user.id, error = %err, "Failed to lock account");
                return;
            }
            warn!(
                user_id = %user.id,
                attempts,
                "Account locked after repeated failed logins"
            );
        }
    }
}
