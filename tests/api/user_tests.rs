//! User profile and account API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use pet_registry::application::dto::{PersonalCabinetDto, PetInfoDto, UserInfoDto};

use crate::common::{pet_json, TestApp};

#[tokio::test]
async fn test_get_own_profile_by_email() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;

    let response = app
        .server
        .get("/api/v1/users")
        .add_query_param("email", &john.email)
        .authorization_bearer(&john.token)
        .await;

    response.assert_status_ok();
    let user: UserInfoDto = response.json();
    assert_eq!(user.user_id, john.id.to_string());
    assert_eq!(user.first_name, "John");
    assert_eq!(user.phone_number, "+70001110000");
}

#[tokio::test]
async fn test_profile_lookup_requires_token() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;

    let response = app
        .server
        .get("/api/v1/users")
        .add_query_param("email", &john.email)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(!response.text().contains("+70001110000"));
}

#[tokio::test]
async fn test_profile_of_another_user_is_forbidden() {
    let app = TestApp::new();
    // Registered with the phone number hidden.
    let john = app.user("john@test.com").await;
    let jane = app.user("jane@test.com").await;

    let response = app
        .server
        .get("/api/v1/users")
        .add_query_param("email", &john.email)
        .authorization_bearer(&jane.token)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(!response.text().contains("+70001110000"));
}

#[tokio::test]
async fn test_admin_reads_any_profile() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    let admin = app.admin("admin@test.com").await;

    let response = app
        .server
        .get("/api/v1/users")
        .add_query_param("email", &john.email)
        .authorization_bearer(&admin.token)
        .await;

    response.assert_status_ok();
    let user: UserInfoDto = response.json();
    assert_eq!(user.email, john.email);
}

#[tokio::test]
async fn test_get_unknown_user_by_email() {
    let app = TestApp::new();
    let admin = app.admin("admin@test.com").await;

    let response = app
        .server
        .get("/api/v1/users")
        .add_query_param("email", "nobody@test.com")
        .authorization_bearer(&admin.token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_personal_cabinet_lists_own_pets() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    app.create_pet(&john, pet_json("999999999999999", "TTT 1111"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get("/api/v1/users/me")
        .authorization_bearer(&john.token)
        .await;

    response.assert_status_ok();
    let cabinet: PersonalCabinetDto = response.json();
    assert_eq!(cabinet.email, "john@test.com");
    assert_eq!(cabinet.phone_number, "+70001110000");
    assert_eq!(cabinet.social_networks.len(), 1);
    assert_eq!(cabinet.pets.len(), 1);
    assert_eq!(cabinet.pets[0].chip_id, "999999999999999");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;

    let response = app
        .server
        .patch("/api/v1/users/me")
        .authorization_bearer(&john.token)
        .json(&json!({
            "email": "john@test.com",
            "first_name": "Johnny",
            "social_networks": [
                { "social_network_id": 2, "link": "https://vk.com/johnny" },
                { "social_network_id": 3, "link": "+70001110000" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let user: UserInfoDto = response.json();
    assert_eq!(user.first_name, "Johnny");
    assert_eq!(user.phone_number, "+70001110000");
    let titles: Vec<_> = user.social_networks.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["VK", "WhatsApp"]);
}

#[tokio::test]
async fn test_update_password_then_login() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;

    app.server
        .patch("/api/v1/users/me")
        .authorization_bearer(&john.token)
        .json(&json!({ "email": "john@test.com", "password": "new-password-1" }))
        .await
        .assert_status_ok();

    app.login("john@test.com", "new-password-1")
        .await
        .assert_status_ok();
    app.login("john@test.com", crate::common::PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_password_keeps_current_one() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;

    app.server
        .patch("/api/v1/users/me")
        .authorization_bearer(&john.token)
        .json(&json!({ "email": "john@test.com", "password": "   " }))
        .await
        .assert_status_ok();

    app.login("john@test.com", crate::common::PASSWORD)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_someone_elses_profile_is_forbidden() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    app.user("jane@test.com").await;

    let response = app
        .server
        .patch("/api/v1/users/me")
        .authorization_bearer(&john.token)
        .json(&json!({ "email": "jane@test.com", "first_name": "Mallory" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_own_account() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    app.create_pet(&john, pet_json("999999999999999", "TTT 1111"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .delete(&format!("/api/v1/users/{}", john.id))
        .authorization_bearer(&john.token)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let tombstones = app.store.deleted_users();
    assert_eq!(tombstones.len(), 1);
    assert_eq!(tombstones[0].user_id, john.id);
    assert_eq!(tombstones[0].email, "john@test.com");

    assert_eq!(app.store.pet_count(), 0);
    app.login("john@test.com", crate::common::PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_other_account_is_forbidden() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    let jane = app.user("jane@test.com").await;

    let response = app
        .server
        .delete(&format!("/api/v1/users/{}", jane.id))
        .authorization_bearer(&john.token)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(app.store.deleted_users().is_empty());
}

#[tokio::test]
async fn test_pets_of_user() {
    let app = TestApp::new();
    let john = app.user("john@test.com").await;
    app.create_pet(&john, pet_json("999999999999999", "TTT 1111")).await;
    app.create_pet(&john, pet_json("111111111111111", "AAA 2222")).await;

    let response = app
        .server
        .get(&format!("/api/v1/users/{}/pets", john.id))
        .await;

    response.assert_status_ok();
    let pets: Vec<PetInfoDto> = response.json();
    assert_eq!(pets.len(), 2);
    assert!(pets.iter().all(|p| p.owners.len() == 1));
}
