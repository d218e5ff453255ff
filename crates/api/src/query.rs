//! Shared query parameter types for API handlers.
//!
//! List parameters arrive as raw strings so the validation layer owns the
//! error shape; axum's own rejection bodies never leak through for these.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for `GET /themes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeListParams {
    pub include_completed: Option<String>,
    pub include_archived: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

/// Query parameters for `GET /logs`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogListParams {
    pub theme_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

/// Query parameters for `GET /notes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    pub category: Option<String>,
    pub theme_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

/// Boolean query flags: only the literal string `true` turns a flag on.
pub fn flag(param: Option<&str>) -> bool {
    param == Some("true")
}

/// Decode an optional opaque cursor parameter, surfacing a decode failure
/// as a 400 rather than silently restarting the scan.
pub fn decode_cursor<C: DeserializeOwned>(raw: Option<&str>) -> Result<Option<C>, AppError> {
    match raw {
        None => Ok(None),
        Some(raw) => manabi_core::cursor::decode(raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest("Invalid cursor format".to_string())),
    }
}
