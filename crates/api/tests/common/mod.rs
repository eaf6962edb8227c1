//! Shared helpers for API integration tests.
//!
//! Each test file declares `mod common;` and uses only part of this module.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskmitra_api::auth::jwt::{generate_access_token, JwtConfig, JwtVerifier};
use taskmitra_api::auth::{AuthVerifier, InvalidToken};
use taskmitra_api::config::ServerConfig;
use taskmitra_api::router::build_app_router;
use taskmitra_api::state::AppState;
use taskmitra_core::types::DbId;
use taskmitra_db::models::user::CreateUser;
use taskmitra_db::repositories::UserRepo;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

fn build_with_verifier(pool: PgPool, verifier: Arc<dyn AuthVerifier>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        verifier,
    };
    build_app_router(state, &config)
}

/// Build the full application router with all middleware layers and the
/// production JWT verifier.
pub fn build_test_app(pool: PgPool) -> Router {
    let verifier = Arc::new(JwtVerifier::new(test_jwt_config()));
    build_with_verifier(pool, verifier)
}

/// Verifier that accepts any token as the same fixed user.
pub struct DemoVerifier(pub DbId);

impl AuthVerifier for DemoVerifier {
    fn verify(&self, _token: &str) -> Result<DbId, InvalidToken> {
        Ok(self.0)
    }
}

/// Build the application with every bearer token resolving to `user_id`.
pub fn build_demo_app(pool: PgPool, user_id: DbId) -> Router {
    build_with_verifier(pool, Arc::new(DemoVerifier(user_id)))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user row plus a valid access token for it.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

/// Create a user directly in the database and mint a token for it.
pub async fn create_test_user(pool: &PgPool, username: &str) -> TestUser {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        first_name: String::new(),
        last_name: String::new(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    TestUser {
        id: user.id,
        token: token_for(user.id),
    }
}

/// Mint an access token for `user_id` without touching the database.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_jwt_config()).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body.to_string()))).await
}

/// POST a raw, possibly malformed, body.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body.to_string()))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body.to_string()))).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::PATCH, uri, Some(token), Some(body.to_string()))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Send an arbitrary method with no body.
pub async fn method_auth(app: Router, method: Method, uri: &str, token: &str) -> Response<Body> {
    send(app, request(method, uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a task through the API and return its JSON representation.
pub async fn create_task(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/tasks", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["task"].clone()
}

/// Create a category through the API and return its JSON representation.
pub async fn create_category(
    pool: &PgPool,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/categories", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["category"].clone()
}
