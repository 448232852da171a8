//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Persistence
/// concerns (mapping failures, concurrency conflicts, storage errors) live in
/// the persistence layer's error types and must not be folded into this one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Raw input failed a value object's own rule (malformed, out of range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation would violate a business invariant or perform an illegal
    /// state transition. The target's observable state is unchanged.
    #[error("domain rule violated: {0}")]
    RuleViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        Self::RuleViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
