//! Meta-note body validators.
//!
//! `noteDate` never appears here: it is server-assigned at creation and
//! immutable afterwards, so no body may carry it.

use serde_json::Value;

use super::fields::{as_object, nullable_uuid, present_string, required_string, uuid_array};
use super::{validation_error, Patch};
use crate::error::CoreError;
use crate::types::{DbId, NoteCategory};

/// Sanitized `POST /notes` body.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub category: NoteCategory,
    pub body: String,
    pub theme_ids: Vec<DbId>,
    pub related_log_id: Option<DbId>,
}

/// Sanitized `PATCH /notes/{id}` body. `theme_ids` is a full replacement
/// of the linked set when present.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub category: Option<NoteCategory>,
    pub body: Option<String>,
    pub theme_ids: Option<Vec<DbId>>,
    pub related_log_id: Patch<DbId>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.body.is_none()
            && self.theme_ids.is_none()
            && self.related_log_id.is_missing()
    }
}

fn category_field(data: &serde_json::Map<String, Value>) -> Result<Option<NoteCategory>, CoreError> {
    match data.get("category") {
        None => Ok(None),
        Some(Value::String(s)) => match NoteCategory::parse(s) {
            Some(category) => Ok(Some(category)),
            None => Err(category_error()),
        },
        Some(_) => Err(category_error()),
    }
}

fn category_error() -> CoreError {
    validation_error(format!(
        "category must be one of: {}",
        NoteCategory::ALL.join(", ")
    ))
}

pub fn validate_note_create(body: &Value) -> Result<CreateNote, CoreError> {
    let data = as_object(body)?;

    let category = category_field(data)?.ok_or_else(category_error)?;
    let note_body = required_string(data, "body")?;
    let theme_ids = uuid_array(data, "themeIds")?.unwrap_or_default();
    let related_log_id = match nullable_uuid(data, "relatedLogId")? {
        Patch::Value(id) => Some(id),
        Patch::Null | Patch::Missing => None,
    };

    Ok(CreateNote {
        category,
        body: note_body,
        theme_ids,
        related_log_id,
    })
}

pub fn validate_note_patch(body: &Value) -> Result<NotePatch, CoreError> {
    let data = as_object(body)?;

    let patch = NotePatch {
        category: category_field(data)?,
        body: present_string(data, "body")?,
        theme_ids: uuid_array(data, "themeIds")?,
        related_log_id: nullable_uuid(data, "relatedLogId")?,
    };

    if patch.is_empty() {
        return Err(validation_error("At least one field must be provided"));
    }
    Ok(patch)
}
