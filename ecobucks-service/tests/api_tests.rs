mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/auth")
        .json(&json!({
            "name": "Nicola",
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user"]["username"], "nicola");
    assert_eq!(body["data"]["user"]["name"], "Nicola");
    assert_eq!(body["data"]["user"]["credits"], 0.0);
    assert_eq!(body["data"]["user"]["is_operator"], false);
    assert!(body["data"]["user"]["password_hash"].is_null());
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    let verified = app.authenticator.verify_access_token(token).unwrap();
    assert_eq!(verified.subject, body["data"]["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    app.seed_user("nicola", "pass_word!", false).await;

    let response = app
        .put("/auth")
        .json(&json!({
            "name": "Other Nicola",
            "username": "nicola",
            "password": "another_pass"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/auth")
        .json(&json!({
            "name": "Nicola",
            "username": "n!",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/auth")
        .json(&json!({
            "name": "Nicola",
            "username": "nicola",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("nicola", "pass_word!", false).await;

    let response = app
        .post("/auth")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["id"], user.id.to_string());

    let token = body["data"]["token"].as_str().unwrap();
    let profile = app
        .get_authenticated("/me", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(profile.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.seed_user("nicola", "pass_word!", false).await;

    let response = app
        .post("/auth")
        .json(&json!({
            "username": "nicola",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth")
        .json(&json!({
            "username": "nobody",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("nicola", "pass_word!", false).await;
    let refresh_token = app
        .authenticator
        .issue_refresh_token(&user.id.to_string())
        .unwrap();

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let access_token = body["data"]["token"].as_str().unwrap();
    let verified = app.authenticator.verify_access_token(access_token).unwrap();
    assert_eq!(verified.subject, user.id.to_string());
    assert!(app
        .authenticator
        .verify_refresh_token(body["data"]["refresh_token"].as_str().unwrap())
        .is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("nicola", "pass_word!", false).await;

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": app.token_for(&user) }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_for_missing_user() {
    let app = TestApp::spawn().await;
    let refresh_token = app
        .authenticator
        .issue_refresh_token(&uuid::Uuid::new_v4().to_string())
        .unwrap();

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("nicola", "pass_word!", true).await;

    let response = app
        .get_authenticated("/me", &app.token_for(&user))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["is_operator"], true);
    assert!(body["data"]["transactions"].as_array().unwrap().is_empty());
    assert!(body["data"]["password_hash"].is_null());
}
