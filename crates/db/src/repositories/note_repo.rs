//! Repository for the `meta_notes` table and its theme links.
//!
//! Theme links have no independent lifecycle: they are written in the same
//! transaction as the note they belong to, and a `themeIds` patch replaces
//! the full set.

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use manabi_core::cursor::{self, NoteCursor, Page};
use manabi_core::state::ResourceState;
use manabi_core::types::{DbId, LocalDate};
use manabi_core::validation::{CreateNote, NotePatch, Patch};

use crate::guard::TenantScope;
use crate::models::note::{LinkedTheme, MetaNote, NoteDetail, NoteListFilter, RelatedLogSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, category, body, note_date, related_log_id, \
    state, state_changed_at, created_at, updated_at";

/// Provides CRUD operations for meta notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note and its theme links in one transaction.
    ///
    /// `note_date` is supplied by the caller from the server clock, never
    /// from client input.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateNote,
        note_date: LocalDate,
    ) -> Result<MetaNote, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO meta_notes (id, owner_id, category, body, note_date, related_log_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, MetaNote>(&query)
            .bind(Uuid::now_v7())
            .bind(owner_id)
            .bind(input.category)
            .bind(&input.body)
            .bind(note_date)
            .bind(input.related_log_id)
            .fetch_one(&mut *tx)
            .await?;

        insert_links(&mut tx, note.id, &input.theme_ids).await?;

        tx.commit().await?;
        Ok(note)
    }

    /// List notes within the scope, ordered `note_date DESC, created_at
    /// DESC, id DESC`. The theme filter goes through the join table.
    pub async fn list(
        pool: &PgPool,
        scope: &TenantScope,
        filter: &NoteListFilter,
        limit: i64,
        cursor: Option<&NoteCursor>,
    ) -> Result<Page<MetaNote>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM meta_notes WHERE "
        ));
        scope.push_predicates(&mut qb);

        if let Some(category) = filter.category {
            qb.push(" AND category = ").push_bind(category);
        }
        if let Some(theme_id) = filter.theme_id {
            qb.push(
                " AND EXISTS (SELECT 1 FROM meta_note_themes mnt \
                 WHERE mnt.meta_note_id = meta_notes.id AND mnt.theme_id = ",
            )
            .push_bind(theme_id)
            .push(")");
        }
        if let Some(start) = filter.start {
            qb.push(" AND note_date >= ").push_bind(start);
        }
        if let Some(end) = filter.end {
            qb.push(" AND note_date <= ").push_bind(end);
        }
        if let Some(c) = cursor {
            qb.push(" AND (note_date, created_at, id) < (")
                .push_bind(c.note_date)
                .push(", ")
                .push_bind(c.created_at)
                .push(", ")
                .push_bind(c.id)
                .push(")");
        }
        qb.push(" ORDER BY note_date DESC, created_at DESC, id DESC LIMIT ")
            .push_bind(limit + 1);

        let rows = qb.build_query_as::<MetaNote>().fetch_all(pool).await?;
        Ok(cursor::paginate(rows, limit as usize, |note| NoteCursor {
            note_date: note.note_date,
            created_at: note.created_at,
            id: note.id,
        }))
    }

    /// Find a note by id within the scope, with its related-log projection
    /// and linked themes.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<Option<NoteDetail>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM meta_notes WHERE id = "
        ));
        qb.push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);

        let Some(note) = qb.build_query_as::<MetaNote>().fetch_optional(pool).await? else {
            return Ok(None);
        };

        // The reference stays meaningful history even when the log has
        // since been soft-deleted, so the projection lookup skips the
        // default state filter.
        let related_log = match note.related_log_id {
            Some(log_id) => {
                let log_scope = TenantScope::include_deleted(scope.owner_id());
                let mut qb = QueryBuilder::<Postgres>::new(
                    "SELECT id, theme_id, date, summary FROM learning_logs WHERE id = ",
                );
                qb.push_bind(log_id).push(" AND ");
                log_scope.push_predicates(&mut qb);
                qb.build_query_as::<RelatedLogSummary>()
                    .fetch_optional(pool)
                    .await?
            }
            None => None,
        };

        let themes = sqlx::query_as::<_, LinkedTheme>(
            "SELECT t.id, t.name FROM themes t \
             JOIN meta_note_themes mnt ON mnt.theme_id = t.id \
             WHERE mnt.meta_note_id = $1 \
             ORDER BY mnt.created_at, t.id",
        )
        .bind(note.id)
        .fetch_all(pool)
        .await?;

        Ok(Some(NoteDetail {
            note,
            related_log,
            themes,
        }))
    }

    /// Apply a patch to a note within the scope. A `themeIds` patch
    /// replaces the whole link set (delete all, insert the new set) in the
    /// same transaction as the field update. `note_date` is immutable and
    /// never appears in a patch.
    pub async fn update(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
        patch: &NotePatch,
    ) -> Result<Option<MetaNote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE meta_notes SET updated_at = NOW()");

        if let Some(category) = patch.category {
            qb.push(", category = ").push_bind(category);
        }
        if let Some(body) = &patch.body {
            qb.push(", body = ").push_bind(body);
        }
        match patch.related_log_id {
            Patch::Missing => {}
            Patch::Null => {
                qb.push(", related_log_id = NULL");
            }
            Patch::Value(log_id) => {
                qb.push(", related_log_id = ").push_bind(log_id);
            }
        }

        qb.push(" WHERE id = ").push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);
        qb.push(format!(" RETURNING {COLUMNS}"));

        let Some(note) = qb
            .build_query_as::<MetaNote>()
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(theme_ids) = &patch.theme_ids {
            sqlx::query("DELETE FROM meta_note_themes WHERE meta_note_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_links(&mut tx, id, theme_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(note))
    }

    /// Logically delete a note within the scope. Link rows stay in place;
    /// they are invisible once their note is. Returns `false` when no live
    /// row matched.
    pub async fn delete(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE meta_notes SET state = ");
        qb.push_bind(ResourceState::Deleted)
            .push(", state_changed_at = NOW() WHERE id = ")
            .push_bind(id)
            .push(" AND ");
        scope.push_predicates(&mut qb);

        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Insert one link row per theme, skipping duplicates in the input so a
/// repeated id cannot trip the primary key.
async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    note_id: DbId,
    theme_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    let mut seen = Vec::with_capacity(theme_ids.len());
    for theme_id in theme_ids {
        if seen.contains(theme_id) {
            continue;
        }
        seen.push(*theme_id);
        sqlx::query("INSERT INTO meta_note_themes (meta_note_id, theme_id) VALUES ($1, $2)")
            .bind(note_id)
            .bind(theme_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
