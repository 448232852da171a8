//! Bidirectional transform between an aggregate and its persisted record.

use domainkit_core::AggregateRoot;

use crate::error::MappingError;

/// Maps an aggregate to/from a storage-owned record.
///
/// The record type is opaque to the kernel — its schema and wire format are
/// the storage adapter's concern. The mapper only guarantees:
///
/// - `to_domain` reconstructs the aggregate by driving the **same factories**
///   used at runtime construction (value object `create`, entity/aggregate
///   `restore`). Persisted data is never assigned into private fields
///   directly, so corrupt or legacy data cannot bypass validation; failures
///   surface as [`MappingError`], distinct from a live caller's
///   [`DomainError`](domainkit_core::DomainError).
/// - `to_record` extracts a snapshot using only the root's public read
///   accessors, and round-trips losslessly:
///   `to_domain(to_record(a))` equals `a` by identity and by every
///   observable attribute for any `a` satisfying its invariants.
pub trait Mapper: Send + Sync {
    type Aggregate: AggregateRoot;
    type Record: Clone + Send + Sync;

    /// Reconstruct an aggregate from a persisted record.
    fn to_domain(&self, record: Self::Record) -> Result<Self::Aggregate, MappingError>;

    /// Extract a serializable snapshot of the aggregate.
    fn to_record(&self, aggregate: &Self::Aggregate) -> Self::Record;
}
