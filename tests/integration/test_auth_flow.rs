// End-to-end authentication flow through the router

use axum::http::{header, StatusCode};

use crate::common::*;

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let (app, _) = test_app();

    let response = send(&app, login_request(DEMO_EMAIL, DEMO_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn test_login_wrong_password_is_401_with_challenge() {
    let (app, _) = test_app();

    let response = send(&app, login_request(DEMO_EMAIL, "wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let body = json_body(response).await;
    assert_eq!(body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let (app, _) = test_app();

    let unknown = json_body(send(&app, login_request("nobody@example.com", "x")).await).await;
    let wrong = json_body(send(&app, login_request(DEMO_EMAIL, "x")).await).await;
    assert_eq!(unknown["error"], wrong["error"]);
}

#[tokio::test]
async fn test_me_with_login_token() {
    let (app, _) = test_app();
    let token = login_token(&app, DEMO_EMAIL, DEMO_PASSWORD).await;

    let response = send(&app, authed("GET", "/users/me", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "testuser");
    assert_eq!(body["email"], DEMO_EMAIL);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_me_without_token_is_401() {
    let (app, _) = test_app();

    let response = send(&app, get("/users/me")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_me_with_garbage_token_is_401() {
    let (app, _) = test_app();

    let response = send(&app, authed("GET", "/users/me", "not.a.jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let (app, state) = test_app();
    let token = state
        .auth_service
        .token_service()
        .issue(DEMO_EMAIL, Some(chrono::Duration::seconds(-30)))
        .unwrap();

    let response = send(&app, authed("GET", "/users/me", &token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login_then_me() {
    let (app, _) = test_app();

    let response = send(&app, register_request("hanako@example.com", "hanako", "sakura!")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = json_body(response).await;
    assert_eq!(user["id"], 2);
    assert_eq!(user["username"], "hanako");
    assert!(user.get("password").is_none());

    let token = login_token(&app, "hanako@example.com", "sakura!").await;
    let me = json_body(send(&app, authed("GET", "/users/me", &token)).await).await;
    assert_eq!(me["email"], "hanako@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email_is_409() {
    let (app, state) = test_app();

    let response = send(&app, register_request(DEMO_EMAIL, "copycat", "pw")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(state.store.user_count(), 1);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, state) = test_app();

    for (email, username, password) in [
        ("no-at-sign", "user", "pw"),
        ("a@example.com", "", "pw"),
        ("a@example.com", "user", ""),
    ] {
        let response = send(&app, register_request(email, username, password)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} / {}", email, username);
    }
    assert_eq!(state.store.user_count(), 1);
}
