//! Repository for the `themes` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use manabi_core::cursor::{self, Page, ThemeCursor};
use manabi_core::state::ResourceState;
use manabi_core::types::DbId;
use manabi_core::validation::{CreateTheme, Patch, ThemePatch};

use crate::guard::TenantScope;
use crate::models::theme::{Theme, ThemeListFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, short_name, goal, is_completed, \
    state, state_changed_at, created_at, updated_at";

/// Provides CRUD operations for themes.
pub struct ThemeRepo;

impl ThemeRepo {
    /// Insert a new theme, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateTheme,
    ) -> Result<Theme, sqlx::Error> {
        let query = format!(
            "INSERT INTO themes (id, owner_id, name, short_name, goal, is_completed)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theme>(&query)
            .bind(Uuid::now_v7())
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.goal)
            .bind(input.is_completed.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// List themes within the scope, ordered `created_at ASC, id ASC`.
    ///
    /// Fetches `limit + 1` rows; the surplus row only signals that a next
    /// page exists. The cursor predicate is a strict lexicographic
    /// greater-than over the ordering columns.
    pub async fn list(
        pool: &PgPool,
        scope: &TenantScope,
        filter: &ThemeListFilter,
        limit: i64,
        cursor: Option<&ThemeCursor>,
    ) -> Result<Page<Theme>, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM themes WHERE "));
        scope.push_predicates(&mut qb);

        if !filter.include_completed {
            qb.push(" AND is_completed = FALSE");
        }
        if let Some(c) = cursor {
            qb.push(" AND (created_at, id) > (")
                .push_bind(c.created_at)
                .push(", ")
                .push_bind(c.id)
                .push(")");
        }
        qb.push(" ORDER BY created_at ASC, id ASC LIMIT ")
            .push_bind(limit + 1);

        let rows = qb.build_query_as::<Theme>().fetch_all(pool).await?;
        Ok(cursor::paginate(rows, limit as usize, |theme| ThemeCursor {
            created_at: theme.created_at,
            id: theme.id,
        }))
    }

    /// Find a theme by id within the scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<Option<Theme>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM themes WHERE id = "
        ));
        qb.push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);

        qb.build_query_as::<Theme>().fetch_optional(pool).await
    }

    /// How many of the given theme ids exist within the scope. Used to
    /// verify linked-theme ownership before inserting note links.
    pub async fn count_owned(
        pool: &PgPool,
        scope: &TenantScope,
        ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM themes WHERE id = ANY(");
        qb.push_bind(ids).push(") AND ");
        scope.push_predicates(&mut qb);

        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Apply a patch to a theme within the scope.
    ///
    /// Returns `None` when no row matched (absent, foreign-owned, or
    /// deleted -- indistinguishable by design).
    pub async fn update(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
        patch: &ThemePatch,
    ) -> Result<Option<Theme>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE themes SET updated_at = NOW()");

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(goal) = &patch.goal {
            qb.push(", goal = ").push_bind(goal);
        }
        match &patch.short_name {
            Patch::Missing => {}
            Patch::Null => {
                qb.push(", short_name = NULL");
            }
            Patch::Value(short_name) => {
                qb.push(", short_name = ").push_bind(short_name);
            }
        }
        if let Some(is_completed) = patch.is_completed {
            qb.push(", is_completed = ").push_bind(is_completed);
        }

        qb.push(" WHERE id = ").push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);
        qb.push(format!(" RETURNING {COLUMNS}"));

        qb.build_query_as::<Theme>().fetch_optional(pool).await
    }

    /// Logically delete a theme, cascading to its live logs and to live
    /// notes linked through the join table, all in one transaction and
    /// stamped with the same `state_changed_at`.
    ///
    /// Returns `false` when the theme did not transition (absent,
    /// foreign-owned, or already deleted).
    pub async fn delete(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let now = chrono::Utc::now();

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE themes SET state = ");
        qb.push_bind(ResourceState::Deleted)
            .push(", state_changed_at = ")
            .push_bind(now)
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND ");
        scope.push_predicates(&mut qb);
        let deleted = qb.build().execute(&mut *tx).await?.rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE learning_logs SET state = ");
        qb.push_bind(ResourceState::Deleted)
            .push(", state_changed_at = ")
            .push_bind(now)
            .push(" WHERE theme_id = ")
            .push_bind(id)
            .push(" AND ");
        scope.push_predicates(&mut qb);
        qb.build().execute(&mut *tx).await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE meta_notes SET state = ");
        qb.push_bind(ResourceState::Deleted)
            .push(", state_changed_at = ")
            .push_bind(now)
            .push(" WHERE ");
        scope.push_predicates(&mut qb);
        qb.push(
            " AND EXISTS (SELECT 1 FROM meta_note_themes mnt \
             WHERE mnt.meta_note_id = meta_notes.id AND mnt.theme_id = ",
        )
        .push_bind(id)
        .push(")");
        qb.build().execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(true)
    }
}
