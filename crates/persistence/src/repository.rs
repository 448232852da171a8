//! Repository port: load/save contract over aggregates.

use std::sync::Arc;

use domainkit_core::{AggregateRoot, Entity};

use crate::error::RepositoryResult;

/// Load/save port over one aggregate type.
///
/// ## Design principles
///
/// - **No storage assumptions**: works with the in-memory implementation
///   (tests/dev) and whatever SQL/NoSQL adapters collaborators provide.
/// - **Whole aggregates only**: no partial/flattened projections in or out.
/// - **Optimistic locking**: `save` compares the aggregate's
///   [`persisted_version`](AggregateRoot::persisted_version) against the
///   stored version; if the store advanced since the aggregate was loaded it
///   fails with [`RepositoryError::Conflict`](crate::RepositoryError) and
///   performs no write. First save wins; the loser retries after a fresh
///   load (never retried here).
/// - **Atomic saves**: after `save` returns — success or failure — the
///   stored record reflects either the pre-save or the post-save state in
///   full, never a partial mixture of fields.
pub trait Repository: Send + Sync {
    type Aggregate: AggregateRoot;

    /// Load the full aggregate, or `Ok(None)` when nothing matches.
    ///
    /// Absence is an explicit value, not an error.
    fn find_by_id(
        &self,
        id: &<Self::Aggregate as Entity>::Id,
    ) -> RepositoryResult<Option<Self::Aggregate>>;

    /// Persist the aggregate's complete state atomically.
    ///
    /// On success, implementations call
    /// [`mark_persisted`](AggregateRoot::mark_persisted) on the aggregate so
    /// a subsequent save from the same instance passes the version check.
    fn save(&self, aggregate: &mut Self::Aggregate) -> RepositoryResult<()>;

    /// Remove the aggregate. Returns whether a record was present.
    fn delete(&self, id: &<Self::Aggregate as Entity>::Id) -> RepositoryResult<bool>;
}

impl<R> Repository for Arc<R>
where
    R: Repository + ?Sized,
{
    type Aggregate = R::Aggregate;

    fn find_by_id(
        &self,
        id: &<Self::Aggregate as Entity>::Id,
    ) -> RepositoryResult<Option<Self::Aggregate>> {
        (**self).find_by_id(id)
    }

    fn save(&self, aggregate: &mut Self::Aggregate) -> RepositoryResult<()> {
        (**self).save(aggregate)
    }

    fn delete(&self, id: &<Self::Aggregate as Entity>::Id) -> RepositoryResult<bool> {
        (**self).delete(id)
    }
}
