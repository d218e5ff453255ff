//! Learning-log model.

use serde::Serialize;
use sqlx::FromRow;

use manabi_core::state::ResourceState;
use manabi_core::types::{DbId, LocalDate, Timestamp};

/// A row from the `learning_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningLog {
    pub id: DbId,
    pub owner_id: DbId,
    pub theme_id: DbId,
    pub date: LocalDate,
    pub summary: String,
    pub details: Option<String>,
    pub tags: Vec<String>,
    pub state: ResourceState,
    pub state_changed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for log listings, combined with AND semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListFilter {
    pub theme_id: Option<DbId>,
    pub start: Option<LocalDate>,
    pub end: Option<LocalDate>,
}
