//! Registration and login API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use pet_registry::application::dto::{TokenResponse, UserInfoDto};

use crate::common::{registration, TestApp, PASSWORD};

#[tokio::test]
async fn test_register_returns_created_user() {
    let app = TestApp::new();

    let response = app.register("john@test.com").await;

    response.assert_status(StatusCode::CREATED);
    let user: UserInfoDto = response.json();
    assert_eq!(user.email, "john@test.com");
    assert_eq!(user.first_name, "John");
    assert!(user.user_id.parse::<i64>().is_ok());
    assert_eq!(user.social_networks.len(), 1);
    assert_eq!(user.social_networks[0].title, "Telegram");
    assert_eq!(user.social_networks[0].link, "https://t.me/john");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("john@test.com").await.assert_status(StatusCode::CREATED);

    let response = app.register("john@test.com").await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], 10005);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&registration("not-an-email"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();
    let mut body = registration("john@test.com");
    body["password"] = json!("short");

    let response = app.server.post("/api/v1/auth/register").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_unknown_social_network() {
    let app = TestApp::new();
    let mut body = registration("john@test.com");
    body["social_networks"] = json!([{ "social_network_id": 42, "link": "https://example.com" }]);

    let response = app.server.post("/api/v1/auth/register").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_issues_bearer_token() {
    let app = TestApp::new();
    app.register("john@test.com").await;

    let response = app.login("john@test.com", PASSWORD).await;

    response.assert_status_ok();
    let tokens: TokenResponse = response.json();
    assert_eq!(tokens.token_type, "Bearer");
    assert_eq!(tokens.expires_in, 3600);
    assert!(!tokens.access_token.is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    app.register("john@test.com").await;

    let response = app.login("john@test.com", "wrong-password").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new();

    let response = app.login("nobody@test.com", PASSWORD).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/users/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], 10003);
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/v1/users/me")
        .authorization_bearer("not.a.token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
