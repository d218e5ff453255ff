//! Logical lifecycle shared by every journal entity.
//!
//! Rows are never physically removed by application logic; deletion is a
//! transition into the terminal DELETED state, and the query layer hides
//! DELETED rows by default.

use serde::{Deserialize, Serialize};

/// Lifecycle state, mapped to the `resource_state` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_state", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceState {
    Active,
    Archived,
    Deleted,
}

impl ResourceState {
    pub fn is_deleted(self) -> bool {
        self == Self::Deleted
    }

    /// Whether application logic may move a resource from `self` to `to`.
    ///
    /// The only transition the API performs is the one-way move into
    /// DELETED. ARCHIVED is a valid stored state but is set outside this
    /// API surface; there is no archive endpoint.
    pub fn can_transition(self, to: ResourceState) -> bool {
        matches!(
            (self, to),
            (Self::Active, Self::Deleted) | (Self::Archived, Self::Deleted)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
            Self::Deleted => "DELETED",
        }
    }
}
