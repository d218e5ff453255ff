//! Validators for raw query-parameter strings.

use std::sync::LazyLock;

use regex::Regex;

use super::validation_error;
use crate::error::CoreError;
use crate::types::{DbId, LocalDate, NoteCategory};

pub const LIMIT_MIN: i64 = 1;
pub const LIMIT_MAX: i64 = 200;
pub const LIMIT_DEFAULT: i64 = 50;

/// Hyphenated UUID form. Stricter than `Uuid::parse_str`, which also
/// accepts braced and dash-less renditions the API does not.
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid regex")
});

/// `YYYY-MM-DD` with zero-padded components.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate an optional `limit` parameter. Absent falls back to the
/// default; a non-integer or out-of-range value is an error rather than a
/// silent clamp.
pub fn validate_limit(param: Option<&str>) -> Result<i64, CoreError> {
    let Some(raw) = param else {
        return Ok(LIMIT_DEFAULT);
    };
    match raw.parse::<i64>() {
        Ok(limit) if (LIMIT_MIN..=LIMIT_MAX).contains(&limit) => Ok(limit),
        _ => Err(validation_error(format!(
            "limit must be between {LIMIT_MIN} and {LIMIT_MAX}"
        ))),
    }
}

pub(super) fn parse_uuid(value: &str, param_name: &str) -> Result<DbId, CoreError> {
    if !UUID_RE.is_match(&value.to_ascii_lowercase()) {
        return Err(validation_error(format!(
            "{param_name} must be a valid UUID"
        )));
    }
    DbId::parse_str(value)
        .map_err(|_| validation_error(format!("{param_name} must be a valid UUID")))
}

/// Validate a UUID path or query parameter.
pub fn validate_uuid_param(value: &str, param_name: &str) -> Result<DbId, CoreError> {
    parse_uuid(value, param_name)
}

/// Validate a strict `YYYY-MM-DD` date parameter. The form check catches
/// unpadded components; the parse catches impossible calendar dates.
pub fn validate_date_param(value: &str, param_name: &str) -> Result<LocalDate, CoreError> {
    if !DATE_RE.is_match(value) {
        return Err(validation_error(format!(
            "{param_name} must be in YYYY-MM-DD format"
        )));
    }
    LocalDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| validation_error(format!("{param_name} must be a valid date")))
}

/// Validate a `category` query parameter.
pub fn validate_category_param(value: &str) -> Result<NoteCategory, CoreError> {
    NoteCategory::parse(value).ok_or_else(|| {
        validation_error(format!(
            "category must be one of: {}",
            NoteCategory::ALL.join(", ")
        ))
    })
}
