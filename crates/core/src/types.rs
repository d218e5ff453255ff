use serde::{Deserialize, Serialize};

/// All primary keys are UUIDv7, generated in the repository layer at insert
/// time. v7 ids are time-ordered, which lets the id serve as the final
/// tie-breaker in cursor pagination.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carry no time-of-day or timezone.
pub type LocalDate = chrono::NaiveDate;

/// Meta-note category, stored in the `note_category` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "note_category", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum NoteCategory {
    Insight,
    Question,
    Emotion,
}

impl NoteCategory {
    /// Wire names of all categories, in display order.
    pub const ALL: [&'static str; 3] = ["INSIGHT", "QUESTION", "EMOTION"];

    /// Parse the wire name (`"INSIGHT"` etc.). Case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INSIGHT" => Some(Self::Insight),
            "QUESTION" => Some(Self::Question),
            "EMOTION" => Some(Self::Emotion),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insight => "INSIGHT",
            Self::Question => "QUESTION",
            Self::Emotion => "EMOTION",
        }
    }
}
