#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use manabi_api::config::{AuthConfig, ServerConfig};
use manabi_api::router::build_app_router;
use manabi_api::state::AppState;
use manabi_core::types::DbId;

/// The owner every request resolves to under the default test app.
pub fn default_owner() -> DbId {
    Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
}

/// Build a test `ServerConfig` with safe defaults and the given auth
/// strategy.
pub fn test_config(auth: AuthConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and mock authentication bound to [`default_owner`].
///
/// This goes through the same [`build_app_router`] as production, so
/// integration tests exercise the identical middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_as(pool, default_owner())
}

/// Like [`build_test_app`], but every request resolves to `owner_id`.
/// Lets tests act as two different tenants against the same database.
pub fn build_test_app_as(pool: PgPool, owner_id: DbId) -> Router {
    let config = test_config(AuthConfig::Mock { owner_id });
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the app with JWT authentication for 401-path tests.
pub fn build_test_app_jwt(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error envelope and return its message.
pub async fn assert_error(
    response: Response<Body>,
    status: StatusCode,
    code: &str,
) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], code, "unexpected error code: {json}");
    json["error"]["message"].as_str().unwrap_or_default().to_string()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a theme through the API and return its id.
pub async fn create_theme(pool: &PgPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/themes",
        serde_json::json!({"name": name, "goal": "learn it properly"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

/// Create a log through the API and return its id.
pub async fn create_log(pool: &PgPool, theme_id: &str, date: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/logs",
        serde_json::json!({"themeId": theme_id, "date": date, "summary": "worked through it"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}
