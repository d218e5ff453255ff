//! Repository for the `learning_logs` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use manabi_core::cursor::{self, LogCursor, Page};
use manabi_core::state::ResourceState;
use manabi_core::types::DbId;
use manabi_core::validation::{CreateLog, LogPatch, Patch};

use crate::guard::TenantScope;
use crate::models::log::{LearningLog, LogListFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, theme_id, date, summary, details, tags, \
    state, state_changed_at, created_at, updated_at";

/// Provides CRUD operations for learning logs.
pub struct LogRepo;

impl LogRepo {
    /// Insert a new log, returning the created row.
    ///
    /// The one-log-per-theme-per-day rule is enforced by the
    /// `uq_learning_logs_owner_theme_date` index, so a duplicate insert
    /// surfaces as a unique-violation database error rather than being
    /// pre-checked here (which would race under concurrency).
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLog,
    ) -> Result<LearningLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_logs (id, owner_id, theme_id, date, summary, details, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningLog>(&query)
            .bind(Uuid::now_v7())
            .bind(owner_id)
            .bind(input.theme_id)
            .bind(input.date)
            .bind(&input.summary)
            .bind(&input.details)
            .bind(input.tags.clone().unwrap_or_default())
            .fetch_one(pool)
            .await
    }

    /// List logs within the scope, ordered `date DESC, created_at DESC,
    /// id DESC`, newest first. The cursor predicate is a strict
    /// lexicographic less-than over the ordering columns.
    pub async fn list(
        pool: &PgPool,
        scope: &TenantScope,
        filter: &LogListFilter,
        limit: i64,
        cursor: Option<&LogCursor>,
    ) -> Result<Page<LearningLog>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM learning_logs WHERE "
        ));
        scope.push_predicates(&mut qb);

        if let Some(theme_id) = filter.theme_id {
            qb.push(" AND theme_id = ").push_bind(theme_id);
        }
        if let Some(start) = filter.start {
            qb.push(" AND date >= ").push_bind(start);
        }
        if let Some(end) = filter.end {
            qb.push(" AND date <= ").push_bind(end);
        }
        if let Some(c) = cursor {
            qb.push(" AND (date, created_at, id) < (")
                .push_bind(c.date)
                .push(", ")
                .push_bind(c.created_at)
                .push(", ")
                .push_bind(c.id)
                .push(")");
        }
        qb.push(" ORDER BY date DESC, created_at DESC, id DESC LIMIT ")
            .push_bind(limit + 1);

        let rows = qb.build_query_as::<LearningLog>().fetch_all(pool).await?;
        Ok(cursor::paginate(rows, limit as usize, |log| LogCursor {
            date: log.date,
            created_at: log.created_at,
            id: log.id,
        }))
    }

    /// Find a log by id within the scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<Option<LearningLog>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM learning_logs WHERE id = "
        ));
        qb.push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);

        qb.build_query_as::<LearningLog>()
            .fetch_optional(pool)
            .await
    }

    /// Apply a patch to a log within the scope. The theme and date are
    /// fixed at creation and never patched.
    pub async fn update(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
        patch: &LogPatch,
    ) -> Result<Option<LearningLog>, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new("UPDATE learning_logs SET updated_at = NOW()");

        if let Some(summary) = &patch.summary {
            qb.push(", summary = ").push_bind(summary);
        }
        match &patch.details {
            Patch::Missing => {}
            Patch::Null => {
                qb.push(", details = NULL");
            }
            Patch::Value(details) => {
                qb.push(", details = ").push_bind(details);
            }
        }
        if let Some(tags) = &patch.tags {
            qb.push(", tags = ").push_bind(tags);
        }

        qb.push(" WHERE id = ").push_bind(id).push(" AND ");
        scope.push_predicates(&mut qb);
        qb.push(format!(" RETURNING {COLUMNS}"));

        qb.build_query_as::<LearningLog>()
            .fetch_optional(pool)
            .await
    }

    /// Logically delete a log within the scope. Returns `false` when no
    /// live row matched.
    pub async fn delete(
        pool: &PgPool,
        scope: &TenantScope,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE learning_logs SET state = ");
        qb.push_bind(ResourceState::Deleted)
            .push(", state_changed_at = NOW() WHERE id = ")
            .push_bind(id)
            .push(" AND ");
        scope.push_predicates(&mut qb);

        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
