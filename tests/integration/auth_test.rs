//! Login, refresh, and logout flows through the HTTP boundary.

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const PASSWORD: &str = "correct horse battery";

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc))
        .expect("timestamp field")
}

#[tokio::test]
async fn test_login_returns_tokens_and_sets_cookies() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let response = app.login("seller@example.com", PASSWORD).await;

    assert_eq!(response.body["status"], "ok");
    let data = response.data();
    assert!(!data["access_token"].as_str().unwrap().is_empty());
    assert_eq!(data["refresh_token"].as_str().unwrap().len(), 128);
    assert_eq!(data["user"]["email"], "seller@example.com");
    assert_eq!(data["user"]["roles"], json!(["USER"]));

    let access_expires = parse_time(&data["expires_at"]);
    let refresh_expires = parse_time(&data["refresh_expires_at"]);
    assert!(refresh_expires > access_expires);

    assert!(response.cookie("access_token").is_some());
    assert!(response.cookie("refresh_token").is_some());
    assert!(response.cookie("adboard_session").is_some());
}

#[tokio::test]
async fn test_login_wrong_password_is_rejected() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "seller@example.com", "password": "nope"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["status"], "error");
    assert_eq!(response.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_leaves_no_trace() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "ghost@example.com", "password": PASSWORD})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
    assert_eq!(app.tokens.len().await, 0);
}

#[tokio::test]
async fn test_login_empty_fields_fail_validation() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "", "password": ""})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["status"], "error");
    assert_eq!(
        response.body["details"]["email"][0],
        "Email must not be empty"
    );
    assert_eq!(
        response.body["details"]["password"][0],
        "Password must not be empty"
    );
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    // Test config locks after three failures.
    for _ in 0..3 {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({"email": "seller@example.com", "password": "nope"})),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // The correct password no longer helps while locked.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "seller@example.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Past the lockout window the account recovers.
    app.clock.advance(Duration::minutes(16));
    app.login("seller@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["status"], "error");
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let access = login.data()["access_token"].as_str().unwrap().to_string();

    let response = app
        .request("GET", "/api/auth/me", None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "seller@example.com");
    assert_eq!(response.data()["roles"], json!(["USER"]));
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let session = login.cookie("adboard_session").unwrap();

    let response = app
        .request_with_headers(
            "GET",
            "/api/auth/me",
            None,
            &[("cookie".to_string(), format!("adboard_session={session}"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "seller@example.com");
}

#[tokio::test]
async fn test_me_with_garbage_bearer_does_not_fall_back_to_cookie() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let session = login.cookie("adboard_session").unwrap();

    let response = app
        .request_with_headers(
            "GET",
            "/api/auth/me",
            None,
            &[
                ("authorization".to_string(), "Bearer not-a-token".to_string()),
                ("cookie".to_string(), format!("adboard_session={session}")),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let first = login.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": first})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rotated = response.data()["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, first);
    assert_eq!(rotated.len(), 128);

    // Rotation swaps the token cookies but leaves the session alone.
    assert!(response.cookie("access_token").is_some());
    assert!(response.cookie("refresh_token").is_some());
    assert!(response.cookie("adboard_session").is_none());
}

#[tokio::test]
async fn test_replayed_refresh_token_kills_the_family() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let first = login.data()["refresh_token"].as_str().unwrap().to_string();

    let rotated = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": first})),
            None,
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let second = rotated.data()["refresh_token"].as_str().unwrap().to_string();

    // Replaying the rotated-away token is reuse.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": first})),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["message"], "Refresh token has already been used");

    // The live sibling died with the family.
    let sibling = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": second})),
            None,
        )
        .await;
    assert_eq!(sibling.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_read_from_cookie() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let refresh = login.cookie("refresh_token").unwrap();

    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/refresh",
            None,
            &[("cookie".to_string(), format!("refresh_token={refresh}"))],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_refresh_token_read_from_header() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let refresh = login.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/refresh",
            None,
            &[("x-refresh-token".to_string(), refresh)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_a_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/refresh", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Refresh token not provided");
}

#[tokio::test]
async fn test_refresh_expired_token_is_rejected() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let refresh = login.data()["refresh_token"].as_str().unwrap().to_string();

    // Default refresh TTL is fourteen days.
    app.clock.advance(Duration::days(15));

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": refresh})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Refresh token has expired");
}

#[tokio::test]
async fn test_logout_without_a_token_still_acknowledges() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true}));
}

#[tokio::test]
async fn test_logout_revokes_the_family_and_expires_cookies() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let refresh = login.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({"refresh_token": refresh})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true}));

    // All three cookies are expired on the way out.
    let mut expired = 0;
    for header in response.headers.get_all(http::header::SET_COOKIE) {
        let raw = header.to_str().unwrap();
        assert!(raw.contains("Max-Age=0"), "unexpired cookie: {raw}");
        expired += 1;
    }
    assert_eq!(expired, 3);

    // The revoked token is no longer good for rotation.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": refresh})),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // Logging out again with the same token still succeeds.
    let again = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({"refresh_token": refresh})),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body, json!({"ok": true}));
}

#[tokio::test]
async fn test_logout_clears_the_session_record() {
    let app = TestApp::new().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;

    let login = app.login("seller@example.com", PASSWORD).await;
    let session = login.cookie("adboard_session").unwrap();
    let cookie_header = format!("adboard_session={session}");

    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/logout",
            None,
            &[("cookie".to_string(), cookie_header.clone())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The session id no longer authenticates.
    let me = app
        .request_with_headers(
            "GET",
            "/api/auth/me",
            None,
            &[("cookie".to_string(), cookie_header)],
        )
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
