//! Opaque pagination cursors.
//!
//! A cursor is the base64 encoding of a small JSON object carrying the
//! ordering fields of the last row a client saw. Ordering fields always end
//! with the row id, so pages stay gap-free and duplicate-free even when
//! timestamps collide. The codec is reversible; a cursor that fails to
//! decode is a client error, never a silent "start over".

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, LocalDate, Timestamp};

/// A client-supplied cursor that could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("Invalid cursor format")]
pub struct CursorError;

/// Cursor for theme listings (`created_at ASC, id ASC`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCursor {
    pub created_at: Timestamp,
    pub id: DbId,
}

/// Cursor for log listings (`date DESC, created_at DESC, id DESC`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCursor {
    pub date: LocalDate,
    pub created_at: Timestamp,
    pub id: DbId,
}

/// Cursor for note listings (`note_date DESC, created_at DESC, id DESC`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCursor {
    pub note_date: LocalDate,
    pub created_at: Timestamp,
    pub id: DbId,
}

pub fn encode<C: Serialize>(cursor: &C) -> String {
    let json = serde_json::to_vec(cursor).expect("cursor structs always serialize");
    STANDARD.encode(json)
}

pub fn decode<C: DeserializeOwned>(raw: &str) -> Result<C, CursorError> {
    let bytes = STANDARD.decode(raw).map_err(|_| CursorError)?;
    serde_json::from_slice(&bytes).map_err(|_| CursorError)
}

/// Paginated collection body: `{ "items": [...], "nextCursor": "..." }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Assemble a page from a `limit + 1` over-fetch.
///
/// If more than `limit` rows came back there is a next page: the surplus row
/// is dropped and the cursor is derived from the last *retained* row.
/// Otherwise the stream is exhausted and `next_cursor` is `None`.
pub fn paginate<T, C, F>(mut rows: Vec<T>, limit: usize, to_cursor: F) -> Page<T>
where
    C: Serialize,
    F: Fn(&T) -> C,
{
    let next_cursor = if rows.len() > limit {
        rows.truncate(limit);
        rows.last().map(|last| encode(&to_cursor(last)))
    } else {
        None
    };

    Page {
        items: rows,
        next_cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};
    use uuid::Uuid;

    fn sample_cursor() -> ThemeCursor {
        ThemeCursor {
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap(),
            id: Uuid::parse_str("0194d2f0-0000-7000-8000-000000000001").unwrap(),
        }
    }

    #[test]
    fn encode_decode_round_trips() {
        let cursor = sample_cursor();
        let opaque = encode(&cursor);
        let back: ThemeCursor = decode(&opaque).unwrap();
        assert_eq!(back.created_at, cursor.created_at);
        assert_eq!(back.id, cursor.id);
    }

    #[test]
    fn cursor_json_uses_camel_case_fields() {
        let opaque = encode(&sample_cursor());
        let json = STANDARD.decode(opaque).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("id").is_some());
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        assert!(decode::<ThemeCursor>("not@base64!").is_err());
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let opaque = STANDARD.encode(b"{\"foo\": 1}");
        assert!(decode::<ThemeCursor>(&opaque).is_err());
    }

    #[test]
    fn paginate_without_surplus_has_no_next_cursor() {
        let page = paginate(vec![1, 2, 3], 3, |_| sample_cursor());
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn paginate_with_surplus_truncates_and_sets_cursor() {
        let page = paginate(vec![10, 20, 30], 2, |n| ThemeCursor {
            created_at: Utc.with_ymd_and_hms(2025, 1, *n as u32 % 28, 0, 0, 0).unwrap(),
            id: Uuid::nil(),
        });
        assert_eq!(page.items, vec![10, 20]);

        // The cursor must come from the last retained row (20), not the
        // discarded surplus row.
        let cursor: ThemeCursor = decode(page.next_cursor.as_deref().unwrap()).unwrap();
        assert_eq!(cursor.created_at.day(), 20);
    }
}
