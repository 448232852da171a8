//! `domainkit-persistence` — persistence boundary contracts.
//!
//! This crate owns the contracts the kernel exposes to storage collaborators:
//! the [`Mapper`] between aggregates and opaque persisted records, the
//! [`Repository`] port (load/save/delete with optimistic concurrency), and
//! the persistence-side error taxonomy. No storage assumptions are made; an
//! in-memory repository is provided as the reference adapter for tests/dev.

pub mod error;
pub mod in_memory;
pub mod mapper;
pub mod repository;

pub use error::{MappingError, RepositoryError, RepositoryResult};
pub use in_memory::InMemoryRepository;
pub use mapper::Mapper;
pub use repository::Repository;
