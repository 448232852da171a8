//! Aggregate root: consistency boundary around an entity graph.

use crate::entity::Entity;
use crate::error::DomainResult;

/// Aggregate root marker + minimal interface.
///
/// An aggregate root is the sole entity through which its internal graph may
/// be read or mutated. It owns:
/// - one or more **invariants**, predicates over the whole graph that hold
///   after every completed mutation;
/// - a **version marker** incremented on every successful mutation, used by
///   repositories for optimistic concurrency;
/// - optionally an outbound event list (see [`AggregateMeta`]) drained by the
///   orchestration layer after a successful save.
///
/// Aggregate methods are synchronous and in-memory; they never perform IO,
/// so no caller can observe the aggregate mid-invariant-check.
pub trait AggregateRoot: Entity {
    /// Monotonically increasing version of the aggregate's state.
    fn version(&self) -> u64;

    /// The version this instance was loaded from (0 for a fresh instance,
    /// never saved). Repositories compare this against the stored version at
    /// save time to detect lost updates.
    fn persisted_version(&self) -> u64;

    /// Called by a repository after a successful save; advances the
    /// persisted-version watermark to the current version.
    fn mark_persisted(&mut self);

    /// Check the aggregate's invariants over its full graph.
    ///
    /// Mutations are written validate-first so they cannot complete in a
    /// broken state; mappers call this explicitly when reconstructing from
    /// persisted data.
    fn check_invariants(&self) -> DomainResult<()>;
}

/// Optimistic concurrency expectation against a stored version.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (idempotent writes, migrations).
    Any,
    /// Require the stored version to be exact.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }
}

/// Bookkeeping embedded by concrete aggregate roots: version marker,
/// persisted-version watermark, and the outbound event list.
///
/// Each successful mutation calls [`record`](AggregateMeta::record), which
/// bumps the version and appends the mutation's notification to the outbox.
/// The orchestration layer drains the outbox **after** a successful save —
/// never speculatively before persistence is confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateMeta<E> {
    version: u64,
    persisted_version: u64,
    outbox: Vec<E>,
}

impl<E> AggregateMeta<E> {
    /// Bookkeeping for a freshly constructed aggregate (never persisted).
    pub fn new() -> Self {
        Self {
            version: 0,
            persisted_version: 0,
            outbox: Vec::new(),
        }
    }

    /// Bookkeeping for an aggregate reconstructed from a persisted record.
    ///
    /// The watermark equals the stored version; the outbox starts empty —
    /// persisted state never carries undispatched notifications.
    pub fn restore(version: u64) -> Self {
        Self {
            version,
            persisted_version: version,
            outbox: Vec::new(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn persisted_version(&self) -> u64 {
        self.persisted_version
    }

    /// Commit one successful mutation: bump the version and queue its
    /// outbound event.
    pub fn record(&mut self, event: E) {
        self.version += 1;
        self.outbox.push(event);
    }

    /// Advance the persisted-version watermark to the current version.
    pub fn mark_persisted(&mut self) {
        self.persisted_version = self.version;
    }

    /// Events recorded since the last drain, in mutation order.
    pub fn pending_events(&self) -> &[E] {
        &self.outbox
    }

    /// Hand the accumulated events to the orchestration layer.
    pub fn drain_outbox(&mut self) -> Vec<E> {
        core::mem::take(&mut self.outbox)
    }
}

impl<E> Default for AggregateMeta<E> {
    fn default() -> Self {
        Self::new()
    }
}
