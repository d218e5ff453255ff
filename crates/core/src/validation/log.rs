//! Learning-log body validators.

use serde_json::Value;

use super::fields::{as_object, nullable_string, present_string, required_string, string_array};
use super::params::validate_date_param;
use super::{validation_error, Patch};
use crate::error::CoreError;
use crate::types::{DbId, LocalDate};

/// Sanitized `POST /logs` body.
#[derive(Debug, Clone)]
pub struct CreateLog {
    pub theme_id: DbId,
    pub date: LocalDate,
    pub summary: String,
    pub details: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Sanitized `PATCH /logs/{id}` body. The theme and date of a log are
/// fixed at creation; only the content fields are patchable.
#[derive(Debug, Clone, Default)]
pub struct LogPatch {
    pub summary: Option<String>,
    pub details: Patch<String>,
    pub tags: Option<Vec<String>>,
}

impl LogPatch {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.details.is_missing() && self.tags.is_none()
    }
}

pub fn validate_log_create(body: &Value) -> Result<CreateLog, CoreError> {
    let data = as_object(body)?;

    let theme_id = super::fields::required_uuid(data, "themeId")?;

    let raw_date = data
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| validation_error("date is required and must be a string"))?;
    let date = validate_date_param(raw_date, "date")?;

    let summary = required_string(data, "summary")?;
    let details = match nullable_string(data, "details")? {
        Patch::Value(s) => Some(s),
        Patch::Null | Patch::Missing => None,
    };
    let tags = string_array(data, "tags")?;

    Ok(CreateLog {
        theme_id,
        date,
        summary,
        details,
        tags,
    })
}

pub fn validate_log_patch(body: &Value) -> Result<LogPatch, CoreError> {
    let data = as_object(body)?;

    let patch = LogPatch {
        summary: present_string(data, "summary")?,
        details: nullable_string(data, "details")?,
        tags: string_array(data, "tags")?,
    };

    if patch.is_empty() {
        return Err(validation_error("At least one field must be provided"));
    }
    Ok(patch)
}
