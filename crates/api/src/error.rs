use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use manabi_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the API's
/// `{"error": {"code", "message"}}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `manabi_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NotFound",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "BadRequest", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "InternalServerError",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BadRequest", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message,
/// inspecting the structured Postgres error code rather than message text.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) on `uq_`-prefixed constraints map to 409.
/// - Foreign-key violations (`23503`) mean the client referenced a row
///   that does not exist (for it) and map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NotFound",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505")
                if db_err
                    .constraint()
                    .is_some_and(|c| c.starts_with("uq_")) =>
            {
                let message = if db_err.constraint()
                    == Some("uq_learning_logs_owner_theme_date")
                {
                    "A log for this theme on this date already exists".to_string()
                } else {
                    "Duplicate value violates a uniqueness rule".to_string()
                };
                (StatusCode::CONFLICT, "Conflict", message)
            }
            Some("23503") => (
                StatusCode::BAD_REQUEST,
                "BadRequest",
                "Referenced entity not found".to_string(),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "An internal error occurred".to_string(),
                )
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "An internal error occurred".to_string(),
            )
        }
    }
}
