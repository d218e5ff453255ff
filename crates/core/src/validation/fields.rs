//! Field-extraction helpers shared by the body validators.

use serde_json::{Map, Value};

use super::{validation_error, Patch};
use crate::error::CoreError;
use crate::types::DbId;

/// The body must be a JSON object; anything else fails before field checks.
pub(super) fn as_object(body: &Value) -> Result<&Map<String, Value>, CoreError> {
    body.as_object()
        .ok_or_else(|| validation_error("Request body must be a JSON object"))
}

/// Required string field, non-empty after trimming. The stored value keeps
/// the caller's original whitespace.
pub(super) fn required_string(
    data: &Map<String, Value>,
    field: &str,
) -> Result<String, CoreError> {
    match data.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(validation_error(format!(
            "{field} is required and must be a non-empty string"
        ))),
    }
}

/// Present-but-optional string field for patches: must be a non-empty
/// string when present.
pub(super) fn present_string(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, CoreError> {
    match data.get(field) {
        None => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(validation_error(format!(
            "{field} must be a non-empty string"
        ))),
    }
}

/// Optional nullable string. Absent stays absent; explicit null and
/// empty-after-trim both normalize to null.
pub(super) fn nullable_string(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Patch<String>, CoreError> {
    match data.get(field) {
        None => Ok(Patch::Missing),
        Some(Value::Null) => Ok(Patch::Null),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                Ok(Patch::Null)
            } else {
                Ok(Patch::Value(s.clone()))
            }
        }
        Some(_) => Err(validation_error(format!(
            "{field} must be a string or null"
        ))),
    }
}

/// Optional boolean field.
pub(super) fn optional_bool(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Option<bool>, CoreError> {
    match data.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(validation_error(format!("{field} must be a boolean"))),
    }
}

/// Optional array-of-strings field. A non-array or an array holding
/// anything but strings is a hard error, never coerced.
pub(super) fn string_array(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Option<Vec<String>>, CoreError> {
    let Some(value) = data.get(field) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| validation_error(format!("{field} must be an array")))?;

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                return Err(validation_error(format!(
                    "{field} must be an array of strings"
                )))
            }
        }
    }
    Ok(Some(out))
}

/// Required UUID-valued string field.
pub(super) fn required_uuid(data: &Map<String, Value>, field: &str) -> Result<DbId, CoreError> {
    let raw = data.get(field).and_then(Value::as_str).ok_or_else(|| {
        validation_error(format!("{field} is required and must be a string"))
    })?;
    super::params::parse_uuid(raw, field)
}

/// Optional array of UUID-valued strings.
pub(super) fn uuid_array(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Option<Vec<DbId>>, CoreError> {
    let Some(raw) = string_array(data, field)? else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(raw.len());
    for value in &raw {
        out.push(super::params::parse_uuid(value, field)?);
    }
    Ok(Some(out))
}

/// Optional nullable UUID-valued string field.
pub(super) fn nullable_uuid(
    data: &Map<String, Value>,
    field: &str,
) -> Result<Patch<DbId>, CoreError> {
    match data.get(field) {
        None => Ok(Patch::Missing),
        Some(Value::Null) => Ok(Patch::Null),
        Some(Value::String(s)) => Ok(Patch::Value(super::params::parse_uuid(s, field)?)),
        Some(_) => Err(validation_error(format!(
            "{field} must be a string or null"
        ))),
    }
}
