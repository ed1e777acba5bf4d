//! Account CRUD over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello World!");

    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/user",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user created Ada");
    assert!(body["user"].get("password_hash").is_none());
    let id = body["user"]["id"].as_str().unwrap();

    let (status, user) = app.request("GET", &format!("/user/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Ada");

    let (status, users) = app.request("GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_create_rejects_empty_fields_and_duplicates() {
    let app = TestApp::new();

    for body in [
        json!({ "name": "", "email": "ada@example.com", "password": "pw" }),
        json!({ "name": "Ada", "email": "", "password": "pw" }),
        json!({ "name": "Ada", "email": "ada@example.com", "password": "" }),
        json!({ "name": "Ada", "email": "ada@example.com" }),
    ] {
        let (status, response) = app.request("POST", "/user", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
    }

    app.create_user("Ada", "ada@example.com", "pw").await;
    let (status, body) = app
        .request(
            "POST",
            "/user",
            None,
            Some(json!({ "name": "Imposter", "email": "ada@example.com", "password": "pw" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_EMAIL");

    let (_, users) = app.request("GET", "/users", None, None).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_unknown_and_invalid_ids() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "GET",
            "/user/00000000-0000-0000-0000-000000000000",
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = app.request("GET", "/user/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_returns_token_for_new_email() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/me/{id}"),
            Some(&token),
            Some(json!({ "email": "lovelace@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["user"]["email"], "lovelace@example.com");
    assert_eq!(body["user"]["name"], "Ada");

    let new_token = body["token"].as_str().unwrap();
    let (status, _) = app
        .request("GET", &format!("/me/{id}"), Some(new_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    app.login("lovelace@example.com", "hunter2").await;
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request("DELETE", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user deleted");

    let (status, _) = app
        .request("DELETE", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("GET", &format!("/user/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
