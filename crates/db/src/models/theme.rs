//! Theme model.

use serde::Serialize;
use sqlx::FromRow;

use manabi_core::state::ResourceState;
use manabi_core::types::{DbId, Timestamp};

/// A row from the `themes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub short_name: Option<String>,
    pub goal: String,
    pub is_completed: bool,
    pub state: ResourceState,
    pub state_changed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for theme listings. Archived visibility is expressed through
/// the tenant scope's state filter, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeListFilter {
    pub include_completed: bool,
}
