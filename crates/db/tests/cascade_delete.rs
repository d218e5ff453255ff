//! Integration tests for the theme delete cascade.
//!
//! Deleting a theme must transition the theme, its live logs, and the live
//! notes linked through the join table in one transaction, all stamped
//! with the same state_changed_at. Rows already deleted are left alone.

mod common;

use sqlx::PgPool;

use common::{date, new_log, new_note, new_theme, owner};
use manabi_core::state::ResourceState;
use manabi_core::types::{DbId, Timestamp};
use manabi_db::guard::TenantScope;
use manabi_db::repositories::{LogRepo, NoteRepo, ThemeRepo};

async fn state_of(pool: &PgPool, table: &str, id: DbId) -> (ResourceState, Timestamp) {
    // Raw inspection, bypassing the guard (test fixtures only).
    let sql = format!("SELECT state, state_changed_at FROM {table} WHERE id = $1");
    sqlx::query_as(&sql).bind(id).fetch_one(pool).await.unwrap()
}

// ---------------------------------------------------------------------------
// Test: cascade reaches logs and linked notes, and only those
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cascade_deletes_logs_and_linked_notes(pool: PgPool) {
    let alice = owner();
    let scope = TenantScope::new(alice);

    let doomed = ThemeRepo::create(&pool, alice, &new_theme("Doomed"))
        .await
        .unwrap();
    let survivor = ThemeRepo::create(&pool, alice, &new_theme("Survivor"))
        .await
        .unwrap();

    let log_a = LogRepo::create(&pool, alice, &new_log(doomed.id, "2025-01-14"))
        .await
        .unwrap();
    let log_b = LogRepo::create(&pool, alice, &new_log(doomed.id, "2025-01-15"))
        .await
        .unwrap();
    let other_log = LogRepo::create(&pool, alice, &new_log(survivor.id, "2025-01-15"))
        .await
        .unwrap();

    let linked_note = NoteRepo::create(
        &pool,
        alice,
        &new_note(vec![doomed.id, survivor.id], None),
        date("2025-01-15"),
    )
    .await
    .unwrap();
    let unlinked_note = NoteRepo::create(&pool, alice, &new_note(vec![], None), date("2025-01-15"))
        .await
        .unwrap();

    let deleted = ThemeRepo::delete(&pool, &scope, doomed.id).await.unwrap();
    assert!(deleted);

    // Theme, both its logs, and the linked note transitioned.
    let (theme_state, theme_stamp) = state_of(&pool, "themes", doomed.id).await;
    assert_eq!(theme_state, ResourceState::Deleted);

    for id in [log_a.id, log_b.id] {
        let (state, stamp) = state_of(&pool, "learning_logs", id).await;
        assert_eq!(state, ResourceState::Deleted);
        assert_eq!(stamp, theme_stamp, "cascade must share one transition stamp");
    }

    let (note_state, note_stamp) = state_of(&pool, "meta_notes", linked_note.id).await;
    assert_eq!(note_state, ResourceState::Deleted);
    assert_eq!(note_stamp, theme_stamp);

    // Everything outside the cascade is untouched.
    let (state, _) = state_of(&pool, "themes", survivor.id).await;
    assert_eq!(state, ResourceState::Active);
    let (state, _) = state_of(&pool, "learning_logs", other_log.id).await;
    assert_eq!(state, ResourceState::Active);
    let (state, _) = state_of(&pool, "meta_notes", unlinked_note.id).await;
    assert_eq!(state, ResourceState::Active);
}

// ---------------------------------------------------------------------------
// Test: rows already deleted keep their original transition stamp
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cascade_skips_already_deleted_children(pool: PgPool) {
    let alice = owner();
    let scope = TenantScope::new(alice);

    let theme = ThemeRepo::create(&pool, alice, &new_theme("Parent"))
        .await
        .unwrap();
    let log = LogRepo::create(&pool, alice, &new_log(theme.id, "2025-01-15"))
        .await
        .unwrap();

    LogRepo::delete(&pool, &scope, log.id).await.unwrap();
    let (_, first_stamp) = state_of(&pool, "learning_logs", log.id).await;

    ThemeRepo::delete(&pool, &scope, theme.id).await.unwrap();

    let (state, stamp) = state_of(&pool, "learning_logs", log.id).await;
    assert_eq!(state, ResourceState::Deleted);
    assert_eq!(
        stamp, first_stamp,
        "a previously deleted log must not be re-stamped by the cascade"
    );
}

// ---------------------------------------------------------------------------
// Test: deleting an already-deleted theme is a no-op for children too
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_delete_does_not_cascade_again(pool: PgPool) {
    let alice = owner();
    let scope = TenantScope::new(alice);

    let theme = ThemeRepo::create(&pool, alice, &new_theme("Once"))
        .await
        .unwrap();
    LogRepo::create(&pool, alice, &new_log(theme.id, "2025-01-15"))
        .await
        .unwrap();

    assert!(ThemeRepo::delete(&pool, &scope, theme.id).await.unwrap());
    let (_, first_stamp) = state_of(&pool, "themes", theme.id).await;

    assert!(!ThemeRepo::delete(&pool, &scope, theme.id).await.unwrap());
    let (_, second_stamp) = state_of(&pool, "themes", theme.id).await;
    assert_eq!(first_stamp, second_stamp);
}

// ---------------------------------------------------------------------------
// Test: a note linked to two themes dies with the first deleted theme
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn note_linked_to_two_themes_follows_first_deletion(pool: PgPool) {
    let alice = owner();
    let scope = TenantScope::new(alice);

    let first = ThemeRepo::create(&pool, alice, &new_theme("First"))
        .await
        .unwrap();
    let second = ThemeRepo::create(&pool, alice, &new_theme("Second"))
        .await
        .unwrap();
    let note = NoteRepo::create(
        &pool,
        alice,
        &new_note(vec![first.id, second.id], None),
        date("2025-01-15"),
    )
    .await
    .unwrap();

    ThemeRepo::delete(&pool, &scope, first.id).await.unwrap();

    let (state, _) = state_of(&pool, "meta_notes", note.id).await;
    assert_eq!(state, ResourceState::Deleted);

    // The second theme survives with the (now invisible) link row intact.
    let (state, _) = state_of(&pool, "themes", second.id).await;
    assert_eq!(state, ResourceState::Active);
}
