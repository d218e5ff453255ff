//! Handlers for meta-note endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use manabi_core::cursor::NoteCursor;
use manabi_core::date::current_reference_date;
use manabi_core::error::CoreError;
use manabi_core::types::DbId;
use manabi_core::validation::{
    validate_category_param, validate_date_param, validate_limit, validate_note_create,
    validate_note_patch, validate_uuid_param, Patch,
};
use manabi_db::guard::TenantScope;
use manabi_db::models::note::NoteListFilter;
use manabi_db::repositories::{LogRepo, NoteRepo, ThemeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{decode_cursor, NoteListParams};
use crate::state::AppState;

/// GET /notes?category&themeId&start&end&limit&cursor
///
/// List the caller's notes, newest note-date first.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params
        .category
        .as_deref()
        .map(validate_category_param)
        .transpose()?;
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
    let cursor = decode_cursor::<NoteCursor>(params.cursor.as_deref())?;

    let scope = TenantScope::new(auth.owner_id);
    let filter = NoteListFilter {
        category,
        theme_id,
        start,
        end,
    };

    let page = NoteRepo::list(&state.pool, &scope, &filter, limit, cursor.as_ref()).await?;
    Ok(Json(page))
}

/// POST /notes
///
/// Create a note. Its date comes from the server clock in the reference
/// timezone; theme links are written in the same transaction as the note.
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let input = validate_note_create(&body)?;

    let scope = TenantScope::new(auth.owner_id);
    verify_theme_links(&state, &scope, &input.theme_ids).await?;
    if let Some(log_id) = input.related_log_id {
        verify_related_log(&state, &scope, log_id).await?;
    }

    let note_date = current_reference_date();
    let note = NoteRepo::create(&state.pool, auth.owner_id, &input, note_date).await?;

    tracing::info!(
        owner_id = %auth.owner_id,
        note_id = %note.id,
        category = ?note.category,
        linked_themes = input.theme_ids.len(),
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}
///
/// Note detail, including the related-log projection and linked themes.
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let detail = NoteRepo::find_by_id(&state.pool, &TenantScope::new(auth.owner_id), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    Ok(Json(detail))
}

/// PATCH /notes/{id}
///
/// Patch a note. A `themeIds` field replaces the full link set; `noteDate`
/// is immutable and not accepted here.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body".into()))?;
    let patch = validate_note_patch(&body)?;

    let scope = TenantScope::new(auth.owner_id);
    if let Some(theme_ids) = &patch.theme_ids {
        verify_theme_links(&state, &scope, theme_ids).await?;
    }
    if let Patch::Value(log_id) = patch.related_log_id {
        verify_related_log(&state, &scope, log_id).await?;
    }

    let note = NoteRepo::update(&state.pool, &scope, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    tracing::info!(
        owner_id = %auth.owner_id,
        note_id = %id,
        "Note updated"
    );

    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = validate_uuid_param(&id, "id")?;

    let deleted = NoteRepo::delete(&state.pool, &TenantScope::new(auth.owner_id), id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Note", id }));
    }

    tracing::info!(
        owner_id = %auth.owner_id,
        note_id = %id,
        "Note deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Every linked theme must exist within the caller's scope. Missing,
/// deleted, and foreign-owned themes collapse to the same client error.
async fn verify_theme_links(
    state: &AppState,
    scope: &TenantScope,
    theme_ids: &[DbId],
) -> AppResult<()> {
    if theme_ids.is_empty() {
        return Ok(());
    }
    let mut unique = theme_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let owned = ThemeRepo::count_owned(&state.pool, scope, &unique).await?;
    if owned != unique.len() as i64 {
        return Err(AppError::BadRequest("Referenced theme not found".into()));
    }
    Ok(())
}

/// The related log must exist within the caller's scope.
async fn verify_related_log(state: &AppState, scope: &TenantScope, log_id: DbId) -> AppResult<()> {
    if LogRepo::find_by_id(&state.pool, scope, log_id).await?.is_none() {
        return Err(AppError::BadRequest("Referenced log not found".into()));
    }
    Ok(())
}
