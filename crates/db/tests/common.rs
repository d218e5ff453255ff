#![allow(dead_code)]

//! Shared fixtures for repository integration tests.
//!
//! Each test run gets fresh owner ids, so tests sharing a database never
//! observe each other's rows through owner-scoped queries.

use uuid::Uuid;

use manabi_core::types::{DbId, LocalDate, NoteCategory};
use manabi_core::validation::{CreateLog, CreateNote, CreateTheme};

pub fn owner() -> DbId {
    Uuid::now_v7()
}

pub fn date(s: &str) -> LocalDate {
    s.parse().expect("test date literal")
}

pub fn new_theme(name: &str) -> CreateTheme {
    CreateTheme {
        name: name.to_string(),
        goal: "learn it properly".to_string(),
        short_name: None,
        is_completed: None,
    }
}

pub fn new_log(theme_id: DbId, day: &str) -> CreateLog {
    CreateLog {
        theme_id,
        date: date(day),
        summary: "worked through the chapter".to_string(),
        details: None,
        tags: None,
    }
}

pub fn new_note(theme_ids: Vec<DbId>, related_log_id: Option<DbId>) -> CreateNote {
    CreateNote {
        category: NoteCategory::Insight,
        body: "it finally clicked".to_string(),
        theme_ids,
        related_log_id,
    }
}
