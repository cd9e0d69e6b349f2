//! Application builder — wires repositories, auth, and router into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use adboard_auth::directory::UserDirectory;
use adboard_auth::rbac::RoleProvider;
use adboard_auth::token::RefreshTokenStore;
use adboard_auth::{
    AuthManager, PasswordHasher, PermissionResolver, RequestAuthenticator, SessionStore,
    TokenCleanup, TokenCodec,
};
use adboard_cache::CacheManager;
use adboard_core::clock::{Clock, SystemClock};
use adboard_core::config::AppConfig;
use adboard_core::error::AppError;
use adboard_database::connection::DatabasePool;
use adboard_database::repositories::{RefreshTokenRepository, RoleRepository, UserRepository};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Adboard server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting Adboard server...");

    // ── Step 1: Initialize cache ─────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache)?);

    // ── Step 2: Initialize repositories ──────────────────────────
    let pool = db.pool().clone();
    let users = Arc::new(UserRepository::new(pool.clone()));
    let tokens = Arc::new(RefreshTokenRepository::new(pool.clone()));
    let roles = Arc::new(RoleRepository::new(pool));

    let directory: Arc<dyn UserDirectory> = users;
    let token_store: Arc<dyn RefreshTokenStore> = tokens;
    let role_provider: Arc<dyn RoleProvider> = roles;

    // ── Step 3: Initialize auth system ───────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let codec = Arc::new(TokenCodec::new(
        &config.auth.token_secret,
        &config.auth.token_algorithm,
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let sessions = Arc::new(SessionStore::new(
        Arc::clone(&cache),
        config.auth.session_ttl_seconds,
    ));
    let permissions = Arc::new(PermissionResolver::new(
        Arc::clone(&role_provider),
        Arc::clone(&cache),
    ));

    let auth = Arc::new(AuthManager::new(
        Arc::clone(&directory),
        Arc::clone(&token_store),
        Arc::clone(&codec),
        Arc::clone(&hasher),
        Arc::clone(&clock),
        config.auth.clone(),
    ));

    let authenticator = Arc::new(RequestAuthenticator::new(
        Arc::clone(&codec),
        Arc::clone(&sessions),
        Arc::clone(&permissions),
        Arc::clone(&clock),
    ));

    // ── Step 4: Shutdown channel & token sweep ───────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = TokenCleanup::new(Arc::clone(&token_store), Arc::clone(&clock));
    let sweep_interval = Duration::from_secs(config.auth.cleanup_interval_seconds.max(1));
    let mut sweep_shutdown = shutdown_rx;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(error) = sweeper.run().await {
                        tracing::warn!(%error, "Refresh token sweep failed");
                    }
                }
                _ = sweep_shutdown.changed() => break,
            }
        }
    });

    // ── Step 5: Build and start HTTP server ──────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        db: Some(db),
        cache,
        auth,
        authenticator,
        sessions,
        permissions,
        roles: role_provider,
        directory,
        clock,
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Adboard server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
