//! Tests for user registration, login, and profile handlers.

use crate::presentation::test_support::TestContext;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

const REGISTER_URL: &str = "/api/users/register/";
const LOGIN_URL: &str = "/api/users/login/";
const ME_URL: &str = "/api/users/me/";

async fn register(ctx: &TestContext, email: &str, password: &str) -> Value {
    let reply = ctx
        .send(TestRequest::post().uri(REGISTER_URL).set_json(json!({
            "email": email,
            "password": password,
            "name": "Test Name",
        })))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body
}

async fn login_token(ctx: &TestContext, email: &str, password: &str) -> String {
    let reply = ctx
        .send(
            TestRequest::post()
                .uri(LOGIN_URL)
                .set_json(json!({ "email": email, "password": password })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    reply.body["token"].as_str().expect("token").to_owned()
}

#[actix_web::test]
async fn register_returns_profile_without_password() {
    let ctx = TestContext::new();

    let body = register(&ctx, "test@example.com", "testpass123").await;

    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["name"], "Test Name");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let ctx = TestContext::new();
    register(&ctx, "test@example.com", "testpass123").await;

    let reply = ctx
        .send(TestRequest::post().uri(REGISTER_URL).set_json(json!({
            "email": "test@example.com",
            "password": "otherpass123",
        })))
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["details"]["email"][0],
        "user with this email already exists."
    );
}

#[rstest]
#[case::bad_email(json!({ "email": "not-an-email", "password": "testpass123" }), "email")]
#[case::short_password(json!({ "email": "test@example.com", "password": "pw" }), "password")]
#[case::missing_password(json!({ "email": "test@example.com" }), "password")]
#[actix_web::test]
async fn invalid_registration_is_rejected(#[case] body: Value, #[case] field: &str) {
    let ctx = TestContext::new();

    let reply = ctx
        .send(TestRequest::post().uri(REGISTER_URL).set_json(body))
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["details"].get(field).is_some(), "{}", reply.body);
}

#[actix_web::test]
async fn login_returns_token_and_user() {
    let ctx = TestContext::new();
    register(&ctx, "test@example.com", "testpass123").await;

    let reply = ctx
        .send(TestRequest::post().uri(LOGIN_URL).set_json(json!({
            "email": "test@example.com",
            "password": "testpass123",
        })))
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    let token = reply.body["token"].as_str().expect("token");
    assert_eq!(token.len(), 40);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(reply.body["user"]["email"], "test@example.com");
}

#[actix_web::test]
async fn repeated_logins_reuse_the_token() {
    let ctx = TestContext::new();
    register(&ctx, "test@example.com", "testpass123").await;

    let first = login_token(&ctx, "test@example.com", "testpass123").await;
    let second = login_token(&ctx, "test@example.com", "testpass123").await;

    assert_eq!(first, second);
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let ctx = TestContext::new();
    register(&ctx, "test@example.com", "testpass123").await;

    let reply = ctx
        .send(TestRequest::post().uri(LOGIN_URL).set_json(json!({
            "email": "test@example.com",
            "password": "wrongpass",
        })))
        .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(reply.body.get("token").is_none());
}

#[actix_web::test]
async fn login_without_password_is_bad_request() {
    let ctx = TestContext::new();

    let reply = ctx
        .send(
            TestRequest::post()
                .uri(LOGIN_URL)
                .set_json(json!({ "email": "test@example.com" })),
        )
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["details"]["password"][0], "This field is required.");
}

#[actix_web::test]
async fn profile_requires_token() {
    let ctx = TestContext::new();

    let reply = ctx.send(TestRequest::get().uri(ME_URL)).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::token_scheme("Token")]
#[case::bearer_scheme("Bearer")]
#[actix_web::test]
async fn profile_accepts_login_token(#[case] scheme: &str) {
    let ctx = TestContext::new();
    let registered = register(&ctx, "test@example.com", "testpass123").await;
    let token = login_token(&ctx, "test@example.com", "testpass123").await;

    let reply = ctx
        .send(
            TestRequest::get()
                .uri(ME_URL)
                .insert_header((AUTHORIZATION, format!("{scheme} {token}"))),
        )
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, registered);
}

#[actix_web::test]
async fn deactivated_user_token_is_rejected() {
    let ctx = TestContext::new();
    let user = ctx.user("test@example.com").await;
    ctx.store.deactivate(user.id);

    let reply = ctx
        .send(TestRequest::get().uri(ME_URL).insert_header(user.auth_header()))
        .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn health_is_public() {
    let ctx = TestContext::new();

    let reply = ctx.send(TestRequest::get().uri("/api/health")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
}

#[actix_web::test]
async fn request_id_is_echoed() {
    let ctx = TestContext::new();

    let reply = ctx
        .send(
            TestRequest::get()
                .uri("/api/health")
                .insert_header(("x-request-id", "req-123")),
        )
        .await;

    assert_eq!(
        reply.headers.get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    assert!(reply.headers.contains_key("server-timing"));
}
