use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, header};
use client::net::types::ErrorBody;
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::{MockBackend, TEST_PASSWORD, TEST_TOKEN, TEST_USER_ID, test_app_state};

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response<Body>) -> String {
    response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned()
}

// =============================================================================
// confirmation_redirect
// =============================================================================

#[test]
fn redirect_on_own_origin_is_kept() {
    assert_eq!(
        confirmation_redirect("https://medgem.app", "https://medgem.app/auth/callback"),
        "https://medgem.app/auth/callback"
    );
    assert_eq!(confirmation_redirect("https://medgem.app", "https://medgem.app"), "https://medgem.app");
}

#[test]
fn foreign_redirect_falls_back_to_callback() {
    assert_eq!(
        confirmation_redirect("https://medgem.app", "https://evil.example/steal"),
        "https://medgem.app/auth/callback"
    );
    assert_eq!(
        confirmation_redirect("https://medgem.app", "https://medgem.app.evil.example/x"),
        "https://medgem.app/auth/callback"
    );
    assert_eq!(confirmation_redirect("https://medgem.app", ""), "https://medgem.app/auth/callback");
}

// =============================================================================
// session
// =============================================================================

#[tokio::test]
async fn session_without_cookie_is_401() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let response = api_routes(state)
        .oneshot(Request::get("/api/auth/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = json_body(response).await;
    assert_eq!(body.error, "not authenticated");
}

#[tokio::test]
async fn session_with_stale_cookie_is_401() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let request = Request::get("/api/auth/session")
        .header(header::COOKIE, format!("{COOKIE_NAME}=expired"))
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_returns_cookie_user() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let request = Request::get("/api/auth/session")
        .header(header::COOKIE, format!("{COOKIE_NAME}={TEST_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user: User = json_body(response).await;
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
}

// =============================================================================
// sign-in / sign-up / sign-out
// =============================================================================

#[tokio::test]
async fn sign_in_sets_http_only_cookie() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let request = post_json(
        "/api/auth/sign-in",
        &serde_json::json!({ "email": "alice@example.com", "password": TEST_PASSWORD }),
    );
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}={TEST_TOKEN}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));

    let user: User = json_body(response).await;
    assert_eq!(user.id, TEST_USER_ID);
}

#[tokio::test]
async fn sign_in_with_wrong_password_reports_provider_message() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let request = post_json(
        "/api/auth/sign-in",
        &serde_json::json!({ "email": "alice@example.com", "password": "nope" }),
    );
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body: ErrorBody = json_body(response).await;
    assert_eq!(body.error, "Invalid login credentials");
}

#[tokio::test]
async fn sign_in_with_blank_email_is_400() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let request = post_json("/api/auth/sign-in", &serde_json::json!({ "email": "  ", "password": "x" }));
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_up_forwards_client_id_and_sanitized_redirect() {
    let (state, auth) = test_app_state(Arc::new(MockBackend::default()));
    let request = post_json(
        "/api/auth/sign-up",
        &serde_json::json!({
            "email": "bob@example.com",
            "password": "hunter22",
            "client_id": "CLT-10-000001",
            "redirect_to": "https://evil.example/",
        }),
    );
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: SignUpResponse = json_body(response).await;
    assert!(body.confirmation_sent);

    let sign_ups = auth.sign_ups.lock().unwrap();
    assert_eq!(
        sign_ups.as_slice(),
        &[(
            "bob@example.com".to_owned(),
            "CLT-10-000001".to_owned(),
            "http://localhost:3000/auth/callback".to_owned()
        )]
    );
}

#[tokio::test]
async fn sign_up_twice_reports_already_registered() {
    let (state, _) = test_app_state(Arc::new(MockBackend::default()));
    let app = api_routes(state);
    let body = serde_json::json!({
        "email": "bob@example.com",
        "password": "hunter22",
        "client_id": "CLT-1-000001",
        "redirect_to": "http://localhost:3000/auth/callback",
    });

    let first = app.clone().oneshot(post_json("/api/auth/sign-up", &body)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(post_json("/api/auth/sign-up", &body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(second).await;
    assert_eq!(error.error, "User already registered");
}

#[tokio::test]
async fn sign_out_revokes_token_and_clears_cookie() {
    let (state, auth) = test_app_state(Arc::new(MockBackend::default()));
    let request = Request::post("/api/auth/sign-out")
        .header(header::COOKIE, format!("{COOKIE_NAME}={TEST_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert_eq!(auth.sign_outs.lock().unwrap().as_slice(), &[TEST_TOKEN.to_owned()]);
}

#[tokio::test]
async fn sign_out_without_cookie_still_clears() {
    let (state, auth) = test_app_state(Arc::new(MockBackend::default()));
    let response = api_routes(state)
        .oneshot(Request::post("/api/auth/sign-out").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(auth.sign_outs.lock().unwrap().is_empty());
}
