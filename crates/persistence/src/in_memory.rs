//! In-memory repository.
//!
//! Reference adapter for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;
use domainkit_core::{AggregateRoot, Entity, ExpectedVersion};
use tracing::{debug, warn};

use crate::error::{RepositoryError, RepositoryResult};
use crate::mapper::Mapper;
use crate::repository::Repository;

type AggregateId<M> = <<M as Mapper>::Aggregate as Entity>::Id;

/// Map-backed repository keyed by aggregate identity.
///
/// The store keeps the committed version next to the opaque record, so the
/// record type owes the repository nothing. Each save replaces the whole
/// entry under a write lock — the stored state is always pre-save or
/// post-save in full.
pub struct InMemoryRepository<M: Mapper> {
    mapper: M,
    records: RwLock<HashMap<AggregateId<M>, (u64, M::Record)>>,
}

impl<M: Mapper> InMemoryRepository<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored aggregates.
    pub fn len(&self) -> RepositoryResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::storage(anyhow!("lock poisoned")))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<M: Mapper> Repository for InMemoryRepository<M> {
    type Aggregate = M::Aggregate;

    fn find_by_id(&self, id: &AggregateId<M>) -> RepositoryResult<Option<Self::Aggregate>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::storage(anyhow!("lock poisoned")))?;

        let Some((version, record)) = records.get(id) else {
            debug!(?id, "find_by_id: absent");
            return Ok(None);
        };

        debug!(?id, version, "find_by_id: loading");
        let aggregate = self.mapper.to_domain(record.clone())?;
        Ok(Some(aggregate))
    }

    fn save(&self, aggregate: &mut Self::Aggregate) -> RepositoryResult<()> {
        // Snapshot before taking the lock; to_record only reads.
        let record = self.mapper.to_record(aggregate);
        let expected = aggregate.persisted_version();

        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::storage(anyhow!("lock poisoned")))?;

        let actual = records.get(aggregate.id()).map(|(v, _)| *v).unwrap_or(0);
        if !ExpectedVersion::Exact(expected).matches(actual) {
            warn!(
                id = ?aggregate.id(),
                expected,
                actual,
                "save: optimistic concurrency conflict, no write performed"
            );
            return Err(RepositoryError::conflict(expected, actual));
        }

        records.insert(aggregate.id().clone(), (aggregate.version(), record));
        aggregate.mark_persisted();
        debug!(id = ?aggregate.id(), version = aggregate.version(), "save: committed");
        Ok(())
    }

    fn delete(&self, id: &AggregateId<M>) -> RepositoryResult<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::storage(anyhow!("lock poisoned")))?;

        let removed = records.remove(id).is_some();
        debug!(?id, removed, "delete");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainkit_core::{identity, AggregateMeta, DomainResult};

    identity!(TallyId);

    /// Minimal aggregate: a named counter that can only go up.
    #[derive(Debug, Clone, PartialEq)]
    struct Tally {
        id: TallyId,
        count: u64,
        meta: AggregateMeta<TallyEvent>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TallyEvent {
        Bumped { to: u64 },
    }

    impl Tally {
        fn start(id: TallyId) -> Self {
            Self {
                id,
                count: 0,
                meta: AggregateMeta::new(),
            }
        }

        fn restore(id: TallyId, count: u64, version: u64) -> DomainResult<Self> {
            Ok(Self {
                id,
                count,
                meta: AggregateMeta::restore(version),
            })
        }

        fn bump(&mut self) {
            self.count += 1;
            self.meta.record(TallyEvent::Bumped { to: self.count });
        }

        fn count(&self) -> u64 {
            self.count
        }
    }

    impl Entity for Tally {
        type Id = TallyId;

        fn id(&self) -> &TallyId {
            &self.id
        }
    }

    impl AggregateRoot for Tally {
        fn version(&self) -> u64 {
            self.meta.version()
        }

        fn persisted_version(&self) -> u64 {
            self.meta.persisted_version()
        }

        fn mark_persisted(&mut self) {
            self.meta.mark_persisted();
        }

        fn check_invariants(&self) -> DomainResult<()> {
            Ok(())
        }
    }

    #[derive(Debug, Clone)]
    struct TallyRecord {
        id: TallyId,
        count: u64,
        version: u64,
    }

    struct TallyMapper;

    impl Mapper for TallyMapper {
        type Aggregate = Tally;
        type Record = TallyRecord;

        fn to_domain(&self, record: TallyRecord) -> Result<Tally, crate::MappingError> {
            Tally::restore(record.id, record.count, record.version)
                .map_err(crate::MappingError::BrokenInvariant)
        }

        fn to_record(&self, aggregate: &Tally) -> TallyRecord {
            TallyRecord {
                id: *aggregate.id(),
                count: aggregate.count(),
                version: aggregate.version(),
            }
        }
    }

    fn repo() -> InMemoryRepository<TallyMapper> {
        InMemoryRepository::new(TallyMapper)
    }

    #[test]
    fn absent_aggregate_is_ok_none() {
        let repo = repo();
        assert!(repo.find_by_id(&TallyId::new()).unwrap().is_none());
    }

    #[test]
    fn save_then_find_round_trips() {
        let repo = repo();
        let id = TallyId::new();
        let mut tally = Tally::start(id);
        tally.bump();
        tally.bump();

        repo.save(&mut tally).unwrap();
        // Saved instance can keep mutating and saving.
        assert_eq!(tally.persisted_version(), tally.version());

        let loaded = repo.find_by_id(&id).unwrap().unwrap();
        assert_eq!(loaded.count(), 2);
        assert_eq!(loaded.version(), 2);
        assert_eq!(loaded.persisted_version(), 2);
    }

    #[test]
    fn first_save_wins_second_conflicts() {
        let repo = repo();
        let id = TallyId::new();
        let mut original = Tally::start(id);
        original.bump();
        repo.save(&mut original).unwrap();

        let mut copy_a = repo.find_by_id(&id).unwrap().unwrap();
        let mut copy_b = repo.find_by_id(&id).unwrap().unwrap();

        copy_a.bump();
        repo.save(&mut copy_a).unwrap();

        copy_b.bump();
        copy_b.bump();
        let err = repo.save(&mut copy_b).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Conflict { expected: 1, actual: 2 }
        ));

        // The stored state equals A's committed state.
        let stored = repo.find_by_id(&id).unwrap().unwrap();
        assert_eq!(stored.count(), copy_a.count());
        assert_eq!(stored.version(), copy_a.version());
    }

    #[test]
    fn two_fresh_aggregates_with_same_id_conflict() {
        let repo = repo();
        let id = TallyId::new();

        let mut first = Tally::start(id);
        first.bump();
        repo.save(&mut first).unwrap();

        let mut second = Tally::start(id);
        second.bump();
        let err = repo.save(&mut second).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { expected: 0, .. }));
    }

    #[test]
    fn save_after_concurrent_delete_conflicts() {
        let repo = repo();
        let id = TallyId::new();
        let mut tally = Tally::start(id);
        tally.bump();
        repo.save(&mut tally).unwrap();

        let mut loaded = repo.find_by_id(&id).unwrap().unwrap();
        assert!(repo.delete(&id).unwrap());

        loaded.bump();
        let err = repo.save(&mut loaded).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { actual: 0, .. }));
    }

    #[test]
    fn delete_reports_presence() {
        let repo = repo();
        let id = TallyId::new();
        assert!(!repo.delete(&id).unwrap());

        let mut tally = Tally::start(id);
        repo.save(&mut tally).unwrap();
        assert!(repo.delete(&id).unwrap());
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_surfaces_as_storage_error_everywhere() {
        let repo = std::sync::Arc::new(repo());
        let id = TallyId::new();
        let mut tally = Tally::start(id);
        repo.save(&mut tally).unwrap();

        let poisoner = std::sync::Arc::clone(&repo);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.records.write().unwrap();
            panic!("poison the store");
        })
        .join();

        assert!(matches!(
            repo.len().unwrap_err(),
            RepositoryError::Storage(_)
        ));
        assert!(matches!(
            repo.find_by_id(&id).unwrap_err(),
            RepositoryError::Storage(_)
        ));
        assert!(matches!(
            repo.save(&mut tally).unwrap_err(),
            RepositoryError::Storage(_)
        ));
    }
}
