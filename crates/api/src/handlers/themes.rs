//! Handlers for theme endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use manabi_core::cursor::ThemeCursor;
use manabi_core::error::CoreError;
use manabi_core::state::ResourceState;
use manabi_core::validation::{
    validate_limit, validate_theme_create, validate_theme_patch, validate_uuid_param,
};
use manabi_db::guard::TenantScope;
use manabi_db::models::theme::ThemeListFilter;
use manabi_db::repositories::ThemeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{decode_cursor, flag, ThemeListParams};
use crate::state::AppState;

/// GET /themes?includeCompleted&includeArchived&limit&cursor
///
/// List the caller's themes, oldest first. By default only ACTIVE,
/// incomplete themes are shown; the two flags widen the view.
pub async fn list_themes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ThemeListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = validate_limit(params.limit.as_deref())?;
    let cursor = decode_cursor::<ThemeCursor>(params.cursor.as_deref())?;

    // includeArchived widens the state filter from ACTIVE-only to the
    // default everything-but-DELETED visibility.
    let scope = if flag(params.include_archived.as_deref()) {
        TenantScope::new(auth.owner_id)
    } else {
        TenantScope::only_state(auth.owner_id, ResourceState::Active)
    };
    let filter = ThemeListFilter {
        include_completed: flag(params.include_completed.as_deref()),
    };

    let page = ThemeRepo::list(&state.pool, &scope, &filter, limit, cursor.as_ref()).await?;
    Ok(Json(page))
}

/// POST /themes
pub async fn create_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let input = validate_theme_create(&body)?;

    let theme = ThemeRepo::create(&state.pool, auth.owner_id, &input).await?;

    tracing::info!(
        owner_id = %auth.owner_id,
        theme_id = %theme.id,
        "Theme created"
    );

    Ok((StatusCode::CREATED, Json(theme)))
}

/// GET /themes/{id}
pub async fn get_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let theme = ThemeRepo::find_by_id(&state.pool, &TenantScope::new(auth.owner_id), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Theme",
            id,
        }))?;

    Ok(Json(theme))
}

/// PATCH /themes/{id}
pub async fn update_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let patch = validate_theme_patch(&body)?;

    let theme = ThemeRepo::update(&state.pool, &TenantScope::new(auth.owner_id), id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Theme",
            id,
        }))?;

    tracing::info!(
        owner_id = %auth.owner_id,
        theme_id = %id,
        "Theme updated"
    );

    Ok(Json(theme))
}

/// DELETE /themes/{id}
///
/// Logical delete, cascading to the theme's logs and linked notes.
pub async fn delete_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let deleted = ThemeRepo::delete(&state.pool, &TenantScope::new(auth.owner_id), id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Theme",
            id,
        }));
    }

    tracing::info!(
        owner_id = %auth.owner_id,
        theme_id = %id,
        "Theme deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
