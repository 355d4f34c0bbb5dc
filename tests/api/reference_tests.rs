//! Reference list API tests

use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_feature_properties() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/feature-properties").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().map(Vec::len), Some(5));
    assert_eq!(body[0], json!({ "id": 1, "name": "Allergy" }));
}

#[tokio::test]
async fn test_social_networks() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/social-networks").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let titles: Vec<_> = body
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|n| n["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Telegram", "VK", "WhatsApp"]);
}
