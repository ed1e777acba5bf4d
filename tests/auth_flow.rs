//! End-to-end session lifecycle over HTTP.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{TestApp, UnreachableCache};

#[tokio::test]
async fn test_login_and_access_protected_route() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = TestApp::new();
    app.create_user("Ada", "ada@example.com", "hunter2").await;

    let (wrong_status, wrong_body) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope" })),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "hunter2" })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_missing_and_malformed_credentials() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;

    let (status, body) = app.request("GET", &format!("/me/{id}"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "MISSING_CREDENTIALS");

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "MALFORMED_TOKEN");

    let request = Request::builder()
        .method("GET")
        .uri(format!("/me/{id}"))
        .header("authorization", "Basic dXNlcjpwdw==")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app.request("POST", "/me/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_REVOKED");

    // A second logout is rejected by the guard, not by a crash.
    let (status, body) = app.request("POST", "/me/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    app.clock.advance(Duration::from_secs(24 * 3600 + 1));

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let (_, login) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await;
    let old_token = login["token"].as_str().unwrap().to_string();

    app.clock.advance(Duration::from_secs(5));
    let (status, refreshed) = app
        .request("POST", "/me/refresh-token", Some(&old_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_token = refreshed["token"].as_str().unwrap().to_string();
    assert_ne!(new_token, old_token);

    let old_exp: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(login["expires_at"].clone()).unwrap();
    let new_exp: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(refreshed["expires_at"].clone()).unwrap();
    assert!(new_exp > old_exp);

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some(&old_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_REVOKED");

    let (status, _) = app
        .request("GET", &format!("/me/{id}"), Some(&new_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/me/{id}/password"),
            Some(&token),
            Some(json!({ "old_password": "hunter2", "new_password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Password updated successfully");

    let (status, _) = app
        .request("GET", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.login("ada@example.com", "correct horse").await;
}

#[tokio::test]
async fn test_change_password_with_wrong_old_password() {
    let app = TestApp::new();
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/me/{id}/password"),
            Some(&token),
            Some(json!({ "old_password": "wrong", "new_password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    app.login("ada@example.com", "hunter2").await;
}

#[tokio::test]
async fn test_unreachable_revocation_store_denies_access() {
    let app = TestApp::with_cache_provider(Arc::new(UnreachableCache));
    let id = app.create_user("Ada", "ada@example.com", "hunter2").await;
    let token = app.login("ada@example.com", "hunter2").await;

    let (status, body) = app
        .request("GET", &format!("/me/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "STORE_UNAVAILABLE");
    assert_eq!(body["message"], "internal server error");

    let (status, _) = app.request("POST", "/me/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
}
