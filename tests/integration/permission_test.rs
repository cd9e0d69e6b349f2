//! Role administration and ability gating through the HTTP boundary.

use http::StatusCode;
use serde_json::json;

use adboard_entity::role::Permission;

use crate::helpers::TestApp;

const PASSWORD: &str = "correct horse battery";

/// App with an admin, an editor whose role also opens the admin panel,
/// and a seeded permission catalog.
async fn seeded_app() -> TestApp {
    let app = TestApp::new().await;
    app.seed_role(
        "ADMIN",
        &["admin.access", "admin.roles.view", "admin.roles.manage"],
    )
    .await;
    app.seed_role("EDITOR", &["admin.access", "admin.roles.view"])
        .await;
    app.roles
        .set_catalog(vec![
            Permission {
                key: "admin.access".to_string(),
                label: "Access the admin panel".to_string(),
            },
            Permission {
                key: "admin.roles.view".to_string(),
                label: "View roles".to_string(),
            },
            Permission {
                key: "admin.roles.manage".to_string(),
                label: "Edit role permissions".to_string(),
            },
            Permission {
                key: "listing.moderate".to_string(),
                label: "Moderate listings".to_string(),
            },
        ])
        .await;
    app.seed_user("admin@example.com", PASSWORD, &["ADMIN"]).await;
    app.seed_user("editor@example.com", PASSWORD, &["EDITOR"]).await;
    app
}

async fn bearer(app: &TestApp, email: &str) -> String {
    let login = app.login(email, PASSWORD).await;
    login.data()["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_role_listing_requires_authentication() {
    let app = seeded_app().await;

    let response = app.request("GET", "/api/admin/roles", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_listing_requires_admin_abilities() {
    let app = seeded_app().await;
    app.seed_user("seller@example.com", PASSWORD, &["USER"]).await;
    let token = bearer(&app, "seller@example.com").await;

    let response = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["status"], "error");
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("admin.access"));
}

#[tokio::test]
async fn test_admin_lists_roles_and_catalog() {
    let app = seeded_app().await;
    let token = bearer(&app, "admin@example.com").await;

    let response = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();

    // Roles come back sorted by key.
    assert_eq!(data["roles"][0]["key"], "ADMIN");
    assert_eq!(data["roles"][1]["key"], "EDITOR");
    assert_eq!(
        data["roles"][1]["permissions"],
        json!(["admin.access", "admin.roles.view"])
    );

    assert_eq!(data["permissions"].as_array().unwrap().len(), 4);
    assert_eq!(data["permissions"][0]["key"], "admin.access");
    assert_eq!(data["permissions"][0]["label"], "Access the admin panel");
}

#[tokio::test]
async fn test_permission_update_replaces_the_set_and_takes_effect_immediately() {
    let app = seeded_app().await;
    let admin = bearer(&app, "admin@example.com").await;
    let editor = bearer(&app, "editor@example.com").await;

    // The editor's role opens the admin panel before the change.
    let before = app
        .request("GET", "/api/admin/roles", None, Some(&editor))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let update = app
        .request(
            "PUT",
            "/api/admin/roles/EDITOR/permissions",
            Some(json!({"permissions": ["listing.moderate"]})),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.data()["key"], "EDITOR");
    assert_eq!(update.data()["permissions"], json!(["listing.moderate"]));

    // The same bearer token is shut out on its very next request.
    let after = app
        .request("GET", "/api/admin/roles", None, Some(&editor))
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_permission_update_requires_the_manage_ability() {
    let app = seeded_app().await;
    let editor = bearer(&app, "editor@example.com").await;

    let response = app
        .request(
            "PUT",
            "/api/admin/roles/EDITOR/permissions",
            Some(json!({"permissions": []})),
            Some(&editor),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("admin.roles.manage"));
}

#[tokio::test]
async fn test_permission_update_unknown_role_fails_validation() {
    let app = seeded_app().await;
    let admin = bearer(&app, "admin@example.com").await;

    let response = app
        .request(
            "PUT",
            "/api/admin/roles/GHOST/permissions",
            Some(json!({"permissions": ["admin.access"]})),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("GHOST"));
}

#[tokio::test]
async fn test_emptied_role_grants_nothing() {
    let app = seeded_app().await;
    let admin = bearer(&app, "admin@example.com").await;

    let update = app
        .request(
            "PUT",
            "/api/admin/roles/EDITOR/permissions",
            Some(json!({"permissions": []})),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.data()["permissions"], json!([]));

    // A fresh login picks up the emptied role.
    let editor = bearer(&app, "editor@example.com").await;
    let response = app
        .request("GET", "/api/admin/roles", None, Some(&editor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
