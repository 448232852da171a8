//! `domainkit-core` — domain-modeling building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identities, validated value objects, entities, and aggregate roots
//! with invariants, a version marker, and an outbound event list.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateMeta, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::IdentityValue;
pub use value_object::{ValueObject, ValueObjectFactory};
