mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use common::{register_user, send, test_app, test_pool};

#[tokio::test]
#[serial]
async fn register_returns_a_working_token() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    let token = register_user(&app, "newuser@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "newuser@example.com");
}

#[tokio::test]
#[serial]
async fn duplicate_email_is_rejected() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    register_user(&app, "taken@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "taken@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn short_passwords_are_rejected() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "user@example.com", "password": "short" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn login_succeeds_with_correct_credentials() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    register_user(&app, "login@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[serial]
async fn login_email_is_case_insensitive() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    register_user(&app, "cased@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "Cased@Example.COM", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn login_fails_with_wrong_password() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    register_user(&app, "victim@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "victim@example.com", "password": "wrongpassword" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn login_with_unknown_email_does_not_reveal_existence() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn me_requires_a_valid_token() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
