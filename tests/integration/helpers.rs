//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use chrono::Utc;
use http::header::SET_COOKIE;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use adboard_api::{build_app, AppState};
use adboard_auth::directory::{MemoryUserDirectory, UserDirectory};
use adboard_auth::rbac::{MemoryRoleProvider, PermissionResolver, RoleProvider};
use adboard_auth::token::{MemoryRefreshTokenStore, RefreshTokenStore, TokenCodec};
use adboard_auth::{AuthManager, PasswordHasher, RequestAuthenticator, SessionStore};
use adboard_cache::CacheManager;
use adboard_core::clock::{Clock, FixedClock};
use adboard_core::config::auth::AuthConfig;
use adboard_core::config::{AppConfig, DatabaseConfig};
use adboard_entity::user::{User, UserStatus};

/// Test application context wired over in-memory backends.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User store for seeding and assertions
    pub directory: Arc<MemoryUserDirectory>,
    /// Refresh token store for assertions
    pub tokens: Arc<MemoryRefreshTokenStore>,
    /// Role store for seeding
    pub roles: Arc<MemoryRoleProvider>,
    /// Adjustable clock for crossing TTL boundaries
    pub clock: Arc<FixedClock>,
    /// Password hasher matching the one inside the app
    pub hasher: Arc<PasswordHasher>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = test_config();

        let cache = Arc::new(CacheManager::new(&config.cache).expect("Failed to init cache"));
        let directory = Arc::new(MemoryUserDirectory::new());
        let tokens = Arc::new(MemoryRefreshTokenStore::new());
        let roles = Arc::new(MemoryRoleProvider::new());
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let hasher = Arc::new(PasswordHasher::new());

        let codec = Arc::new(
            TokenCodec::new(&config.auth.token_secret, &config.auth.token_algorithm)
                .expect("Failed to build token codec"),
        );
        let sessions = Arc::new(SessionStore::new(
            Arc::clone(&cache),
            config.auth.session_ttl_seconds,
        ));
        let permissions = Arc::new(PermissionResolver::new(
            Arc::clone(&roles) as Arc<dyn RoleProvider>,
            Arc::clone(&cache),
        ));

        let auth = Arc::new(AuthManager::new(
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Arc::clone(&tokens) as Arc<dyn RefreshTokenStore>,
            Arc::clone(&codec),
            Arc::clone(&hasher),
            Arc::clone(&clock) as Arc<dyn Clock>,
            config.auth.clone(),
        ));

        let authenticator = Arc::new(RequestAuthenticator::new(
            Arc::clone(&codec),
            Arc::clone(&sessions),
            Arc::clone(&permissions),
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));

        let state = AppState {
            config: Arc::new(config.clone()),
            db: None,
            cache,
            auth,
            authenticator,
            sessions,
            permissions,
            roles: Arc::clone(&roles) as Arc<dyn RoleProvider>,
            directory: Arc::clone(&directory) as Arc<dyn UserDirectory>,
            clock: Arc::clone(&clock) as Arc<dyn Clock>,
        };

        let router = build_app(state);

        Self {
            router,
            directory,
            tokens,
            roles,
            clock,
            hasher,
            config,
        }
    }

    /// Create a test user and return their ID
    pub async fn seed_user(&self, email: &str, password: &str, roles: &[&str]) -> Uuid {
        let now = self.clock.now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: self
                .hasher
                .hash_password(password)
                .expect("Failed to hash password"),
            display_name: Some("Test User".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            roles_version: 0,
            status: UserStatus::Active,
            failed_login_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        let id = user.id;
        self.directory.insert(user).await;
        id
    }

    /// Define a role with the given permission keys
    pub async fn seed_role(&self, key: &str, permissions: &[&str]) {
        self.roles
            .insert(key, permissions.iter().map(|p| p.to_string()).collect())
            .await;
    }

    /// Login and return the response (assertion included)
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut headers: Vec<(String, String)> = Vec::new();
        if let Some(token) = token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        self.request_with_headers(method, path, body, &headers).await
    }

    /// Make an HTTP request with arbitrary extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(String, String)],
    ) -> TestResponse {
        let body_str = body.map(|b| serde_json::to_string(&b).expect("Failed to serialize body"));

        let mut req = Request::builder().method(method).uri(path);
        if body_str.is_some() {
            req = req.header("Content-Type", "application/json");
        }

        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let req = req
            .body(Body::from(body_str.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers, including Set-Cookie
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Value of a Set-Cookie entry by cookie name, if present
    pub fn cookie(&self, name: &str) -> Option<String> {
        for header in self.headers.get_all(SET_COOKIE) {
            let raw = header.to_str().ok()?;
            if let Some((pair, _)) = raw.split_once(';') {
                if let Some((key, value)) = pair.split_once('=') {
                    if key == name {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }
}

/// Configuration for tests: in-memory cache, fixed secret, short lockout
fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: "postgres://unused-in-tests".to_string(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        cache: Default::default(),
        auth: AuthConfig {
            token_secret: "integration-test-secret".to_string(),
            max_failed_attempts: 3,
            ..AuthConfig::default()
        },
        logging: Default::default(),
    }
}
