//! `domainkit-events` — outbound domain event contract.
//!
//! Aggregates accumulate events while mutating; the orchestration layer
//! drains and dispatches them only after a successful save.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::DomainEvent;
