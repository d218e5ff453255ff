//! Theme body validators.

use serde_json::Value;

use super::fields::{as_object, nullable_string, optional_bool, present_string, required_string};
use super::{validation_error, Patch};
use crate::error::CoreError;

/// Sanitized `POST /themes` body.
#[derive(Debug, Clone)]
pub struct CreateTheme {
    pub name: String,
    pub goal: String,
    pub short_name: Option<String>,
    pub is_completed: Option<bool>,
}

/// Sanitized `PATCH /themes/{id}` body.
#[derive(Debug, Clone, Default)]
pub struct ThemePatch {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub short_name: Patch<String>,
    pub is_completed: Option<bool>,
}

impl ThemePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.goal.is_none()
            && self.short_name.is_missing()
            && self.is_completed.is_none()
    }
}

pub fn validate_theme_create(body: &Value) -> Result<CreateTheme, CoreError> {
    let data = as_object(body)?;

    let name = required_string(data, "name")?;
    let goal = required_string(data, "goal")?;
    let short_name = match nullable_string(data, "shortName")? {
        Patch::Value(s) => Some(s),
        Patch::Null | Patch::Missing => None,
    };
    let is_completed = optional_bool(data, "isCompleted")?;

    Ok(CreateTheme {
        name,
        goal,
        short_name,
        is_completed,
    })
}

pub fn validate_theme_patch(body: &Value) -> Result<ThemePatch, CoreError> {
    let data = as_object(body)?;

    let patch = ThemePatch {
        name: present_string(data, "name")?,
        goal: present_string(data, "goal")?,
        short_name: nullable_string(data, "shortName")?,
        is_completed: optional_bool(data, "isCompleted")?,
    };

    if patch.is_empty() {
        return Err(validation_error("At least one field must be provided"));
    }
    Ok(patch)
}
