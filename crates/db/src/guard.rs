//! Tenant guard: mandatory owner scoping and default state visibility.
//!
//! Every repository read, update, and delete takes a [`TenantScope`]. The
//! scope cannot be built without an owner id, so an unscoped query is
//! unrepresentable rather than a runtime check, and unless a caller opts
//! into different visibility the scope injects `state <> 'DELETED'` into
//! the predicate. Raw unscoped SQL is reserved for test fixtures.

use sqlx::{Postgres, QueryBuilder};

use manabi_core::state::ResourceState;
use manabi_core::types::DbId;

/// State visibility carried by a [`TenantScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    /// Hide DELETED rows. The default for every application read path.
    NotDeleted,
    /// Only rows in exactly this state (e.g. ACTIVE when archived themes
    /// are filtered out of a listing).
    Only(ResourceState),
    /// No state predicate at all. Administrative/test inspection only.
    Any,
}

/// An owner-scoped query context.
#[derive(Debug, Clone, Copy)]
pub struct TenantScope {
    owner_id: DbId,
    state: StateFilter,
}

impl TenantScope {
    /// Scope to an owner with the default visibility (`state <> 'DELETED'`).
    pub fn new(owner_id: DbId) -> Self {
        Self {
            owner_id,
            state: StateFilter::NotDeleted,
        }
    }

    /// Scope to an owner, constraining to exactly one state.
    pub fn only_state(owner_id: DbId, state: ResourceState) -> Self {
        Self {
            owner_id,
            state: StateFilter::Only(state),
        }
    }

    /// Scope to an owner with no state predicate, making DELETED rows
    /// visible. For lookups that deliberately follow references into
    /// soft-deleted history, and for tests.
    pub fn include_deleted(owner_id: DbId) -> Self {
        Self {
            owner_id,
            state: StateFilter::Any,
        }
    }

    pub fn owner_id(&self) -> DbId {
        self.owner_id
    }

    /// Append `owner_id = $n [AND <state predicate>]` to a query. Callers
    /// are mid-`WHERE` (or mid-`AND`) when they invoke this.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("owner_id = ").push_bind(self.owner_id);
        match self.state {
            StateFilter::NotDeleted => {
                qb.push(" AND state <> ").push_bind(ResourceState::Deleted);
            }
            StateFilter::Only(state) => {
                qb.push(" AND state = ").push_bind(state);
            }
            StateFilter::Any => {}
        }
    }
}
