//! HTTP-level integration tests for the learning-log endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, create_log, create_theme, delete, get, patch_json, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_log_returns_201(pool: PgPool) {
    let theme_id = create_theme(&pool, "Rust").await;

    let response = post_json(
        common::build_test_app(pool),
        "/logs",
        serde_json::json!({
            "themeId": theme_id,
            "date": "2025-01-15",
            "summary": "s",
            "tags": ["rust", "sqlx"],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["themeId"], theme_id);
    assert_eq!(json["date"], "2025-01-15");
    assert_eq!(json["summary"], "s");
    assert_eq!(json["tags"], serde_json::json!(["rust", "sqlx"]));
    assert_eq!(json["state"], "ACTIVE");
    assert_eq!(json["details"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_day_returns_409(pool: PgPool) {
    let theme_id = create_theme(&pool, "Rust").await;
    create_log(&pool, &theme_id, "2025-01-15").await;

    let response = post_json(
        common::build_test_app(pool),
        "/logs",
        serde_json::json!({"themeId": theme_id, "date": "2025-01-15", "summary": "again"}),
    )
    .await;

    let message = assert_error(response, StatusCode::CONFLICT, "Conflict").await;
    assert!(message.contains("already exists"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_theme_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/logs",
        serde_json::json!({
            "themeId": "00000000-0000-7000-8000-0000000000ff",
            "date": "2025-01-15",
            "summary": "s",
        }),
    )
    .await;

    let message = assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;
    assert!(message.contains("theme"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_theme_returns_400(pool: PgPool) {
    let theme_id = create_theme(&pool, "Someone else's").await;

    // A different tenant referencing that theme is told the same thing as
    // if it did not exist.
    let stranger = uuid::Uuid::now_v7();
    let response = post_json(
        common::build_test_app_as(pool, stranger),
        "/logs",
        serde_json::json!({"themeId": theme_id, "date": "2025-01-15", "summary": "s"}),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_theme_cannot_take_new_logs(pool: PgPool) {
    let theme_id = create_theme(&pool, "Gone").await;
    delete(common::build_test_app(pool.clone()), &format!("/themes/{theme_id}")).await;

    let response = post_json(
        common::build_test_app(pool),
        "/logs",
        serde_json::json!({"themeId": theme_id, "date": "2025-01-15", "summary": "s"}),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;
}

// ---------------------------------------------------------------------------
// Get / patch / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_patch_delete_round_trip(pool: PgPool) {
    let theme_id = create_theme(&pool, "Rust").await;
    let log_id = create_log(&pool, &theme_id, "2025-01-15").await;

    let response = get(common::build_test_app(pool.clone()), &format!("/logs/{log_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/logs/{log_id}"),
        serde_json::json!({"summary": "revised", "details": "went deeper"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["summary"], "revised");
    assert_eq!(json["details"], "went deeper");

    // Explicit null clears details; omitting it would not.
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/logs/{log_id}"),
        serde_json::json!({"details": null}),
    )
    .await;
    assert_eq!(body_json(response).await["details"], serde_json::Value::Null);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/logs/{log_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/logs/{log_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/logs/{log_id}")).await;
    assert_error(response, StatusCode::NOT_FOUND, "NotFound").await;
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn two_logs_walk_with_limit_one(pool: PgPool) {
    let theme_id = create_theme(&pool, "Rust").await;
    let older = create_log(&pool, &theme_id, "2025-01-14").await;
    let newer = create_log(&pool, &theme_id, "2025-01-15").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/logs?themeId={theme_id}&limit=1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["id"], newer);
    let cursor = page["nextCursor"].as_str().expect("non-null cursor").to_string();

    let response = get(
        common::build_test_app(pool),
        &format!("/logs?themeId={theme_id}&limit=1&cursor={}", urlencode(&cursor)),
    )
    .await;
    let page = body_json(response).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["id"], older);
    assert_eq!(page["nextCursor"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_date_range(pool: PgPool) {
    let theme_id = create_theme(&pool, "Rust").await;
    create_log(&pool, &theme_id, "2025-01-10").await;
    let in_range = create_log(&pool, &theme_id, "2025-01-12").await;
    create_log(&pool, &theme_id, "2025-01-20").await;

    let response = get(
        common::build_test_app(pool),
        "/logs?start=2025-01-11&end=2025-01-15",
    )
    .await;
    let page = body_json(response).await;
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], in_range);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_rejects_malformed_params(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/logs?themeId=abc").await;
    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;

    let response = get(common::build_test_app(pool.clone()), "/logs?start=2025-1-5").await;
    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;

    let response = get(common::build_test_app(pool), "/logs?end=2025-02-30").await;
    assert_error(response, StatusCode::BAD_REQUEST, "BadRequest").await;
}

/// Percent-encode the few characters base64 can produce that are not
/// query-safe.
fn urlencode(raw: &str) -> String {
    raw.replace('+', "%2B").replace('/', "%2F").replace('=', "%3D")
}
