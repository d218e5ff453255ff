//! Meta-note models.

use serde::Serialize;
use sqlx::FromRow;

use manabi_core::state::ResourceState;
use manabi_core::types::{DbId, LocalDate, NoteCategory, Timestamp};

/// A row from the `meta_notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaNote {
    pub id: DbId,
    pub owner_id: DbId,
    pub category: NoteCategory,
    pub body: String,
    pub note_date: LocalDate,
    pub related_log_id: Option<DbId>,
    pub state: ResourceState,
    pub state_changed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Projection of the log a note references, embedded in note detail
/// responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedLogSummary {
    pub id: DbId,
    pub theme_id: DbId,
    pub date: LocalDate,
    pub summary: String,
}

/// Projection of a theme linked to a note.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedTheme {
    pub id: DbId,
    pub name: String,
}

/// A note with its related log and linked themes, as returned by
/// `GET /notes/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDetail {
    #[serde(flatten)]
    pub note: MetaNote,
    pub related_log: Option<RelatedLogSummary>,
    pub themes: Vec<LinkedTheme>,
}

/// Filters for note listings, combined with AND semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteListFilter {
    pub category: Option<NoteCategory>,
    pub theme_id: Option<DbId>,
    pub start: Option<LocalDate>,
    pub end: Option<LocalDate>,
}
