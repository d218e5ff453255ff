//! Input validation for the HTTP API.
//!
//! Validators are pure functions over raw `serde_json::Value` bodies and
//! raw query-parameter strings. Each returns a typed, sanitized DTO or a
//! [`CoreError::Validation`] whose message names the first failing field.
//! Nothing here touches storage; validation failures never reach a query.

mod fields;
mod log;
mod note;
mod params;
mod theme;

pub use log::{validate_log_create, validate_log_patch, CreateLog, LogPatch};
pub use note::{validate_note_create, validate_note_patch, CreateNote, NotePatch};
pub use params::{
    validate_category_param, validate_date_param, validate_limit, validate_uuid_param,
    LIMIT_DEFAULT, LIMIT_MAX, LIMIT_MIN,
};
pub use theme::{validate_theme_create, validate_theme_patch, CreateTheme, ThemePatch};

use crate::error::CoreError;

/// Tri-state PATCH field: omitted, explicitly null, or set to a value.
///
/// A field omitted from a patch body leaves the stored value untouched; an
/// explicit null clears it. `Option` cannot express the difference, so
/// nullable patch fields use this instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }
}

fn validation_error(message: impl Into<String>) -> CoreError {
    CoreError::Validation(message.into())
}
