//! Handlers for learning-log endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use manabi_core::cursor::LogCursor;
use manabi_core::error::CoreError;
use manabi_core::validation::{
    validate_date_param, validate_limit, validate_log_create, validate_log_patch,
    validate_uuid_param,
};
use manabi_db::guard::TenantScope;
use manabi_db::models::log::LogListFilter;
use manabi_db::repositories::{LogRepo, ThemeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{decode_cursor, LogListParams};
use crate::state::AppState;

/// GET /logs?themeId&start&end&limit&cursor
///
/// List the caller's logs, newest first.
pub async fn list_logs(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LogListParams>,
) -> AppResult<impl IntoResponse> {
    let theme_id = params
        .theme_id
        .as_deref()
        .map(|raw| validate_uuid_param(raw, "themeId"))
        .transpose()?;
    let start = params
        .start
        .as_deref()
        .map(|raw| validate_date_param(raw, "start"))
        .transpose()?;
    let end = params
        .end
        .as_deref()
        .map(|raw| validate_date_param(raw, "end"))
        .transpose()?;
    let limit = validate_limit(params.limit.as_deref())?;
    let cursor = decode_cursor::<LogCursor>(params.cursor.as_deref())?;

    let scope = TenantScope::new(auth.owner_id);
    let filter = LogListFilter {
        theme_id,
        start,
        end,
    };

    let page = LogRepo::list(&state.pool, &scope, &filter, limit, cursor.as_ref()).await?;
    Ok(Json(page))
}

/// POST /logs
///
/// Create a log for a day. The referenced theme must belong to the caller;
/// the one-log-per-theme-per-day rule is enforced by the storage layer and
/// surfaces as 409.
pub async fn create_log(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let input = validate_log_create(&body)?;

    let scope = TenantScope::new(auth.owner_id);
    let theme = ThemeRepo::find_by_id(&state.pool, &scope, input.theme_id).await?;
    if theme.is_none() {
        // Missing, deleted, and foreign-owned all collapse to the same
        // client error.
        return Err(AppError::BadRequest("Referenced theme not found".into()));
    }

    let log = LogRepo::create(&state.pool, auth.owner_id, &input).await?;

    tracing::info!(
        owner_id = %auth.owner_id,
        log_id = %log.id,
        theme_id = %log.theme_id,
        date = %log.date,
        "Log created"
    );

    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /logs/{id}
pub async fn get_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let log = LogRepo::find_by_id(&state.pool, &TenantScope::new(auth.owner_id), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Log", id }))?;

    Ok(Json(log))
}

/// PATCH /logs/{id}
pub async fn update_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let patch = validate_log_patch(&body)?;

    let log = LogRepo::update(&state.pool, &TenantScope::new(auth.owner_id), id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Log", id }))?;

    tracing::info!(
        owner_id = %auth.owner_id,
        log_id = %id,
        "Log updated"
    );

    Ok(Json(log))
}

/// DELETE /logs/{id}
pub async fn delete_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let deleted = LogRepo::delete(&state.pool, &TenantScope::new(auth.owner_id), id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Log", id }));
    }

    tracing::info!(
        owner_id = %auth.owner_id,
        log_id = %id,
        "Log deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
