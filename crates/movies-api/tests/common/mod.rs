//! Shared harness for HTTP-level integration tests: builds the full router
//! on top of a per-test database and drives it with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use movies_api::config::ServerConfig;
use movies_api::routes;
use movies_api::state::AppState;
use movies_db::models::user::CreateUser;
use movies_db::repositories::UserRepo;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tracker_core::auth::jwt::{issue_token, JwtConfig};
use tracker_core::auth::password::hash_password;
use tracker_core::roles::ROLE_ADMIN;

pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production-use";

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry_mins: 60,
    }
}

/// Build the application router backed by the given pool, bypassing
/// environment configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    };
    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .with_state(AppState {
            pool,
            config: Arc::new(config),
        })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Consume a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a fresh user through the API and return their token.
pub async fn register_user(app: &Router, username: &str) -> String {
    let response = post_json(
        app,
        "/register",
        json!({ "username": username, "password": "a-strong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

/// Insert an admin user directly and mint a token for them. Registration
/// never grants the admin role, so tests seed admins at the repo level.
pub async fn seed_admin(pool: &PgPool, username: &str) -> String {
    let admin = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hash_password("a-strong-password").unwrap(),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .unwrap();
    issue_token(admin.id, ROLE_ADMIN, &test_jwt_config()).unwrap()
}
