//! Persistence boundary error model.
//!
//! These are **infrastructure-facing** errors, kept apart from
//! [`DomainError`](domainkit_core::DomainError): a mapping failure signals
//! data corruption, not a business-rule violation by a live caller, and must
//! not be reinterpreted as a domain error upstream.

use domainkit_core::DomainError;
use thiserror::Error;

/// Result type used across the persistence layer.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persisted data could not reconstruct a valid aggregate.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A required field is absent from the record.
    #[error("missing field '{0}' in persisted record")]
    MissingField(&'static str),

    /// A field failed the same validation it passes through at runtime
    /// construction (legacy or tampered data).
    #[error("field '{field}' failed domain validation")]
    InvalidField {
        field: &'static str,
        #[source]
        source: DomainError,
    },

    /// The reconstructed aggregate does not satisfy its invariants.
    #[error("reconstructed aggregate violates invariants")]
    BrokenInvariant(#[source] DomainError),

    /// The record is internally inconsistent (e.g. a stored derived field
    /// disagrees with the data it derives from).
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl MappingError {
    pub fn invalid_field(field: &'static str, source: DomainError) -> Self {
        Self::InvalidField { field, source }
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

/// Repository operation error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The stored version advanced since the aggregate was loaded. No write
    /// was performed; reload and retry is the orchestration layer's call.
    #[error("concurrency conflict: aggregate loaded at version {expected}, store is at {actual}")]
    Conflict { expected: u64, actual: u64 },

    /// Reconstruction from the persisted record failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Opaque storage/transport failure.
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

impl RepositoryError {
    pub fn conflict(expected: u64, actual: u64) -> Self {
        Self::Conflict { expected, actual }
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::Storage(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_errors_are_distinct_from_domain_validation() {
        let domain = DomainError::validation("bad email");
        let mapping = MappingError::invalid_field("customer_email", domain.clone());

        // A call site can tell corruption apart from a live validation
        // failure without string matching.
        assert!(matches!(
            mapping,
            MappingError::InvalidField { field: "customer_email", .. }
        ));
        assert!(matches!(domain, DomainError::Validation(_)));
    }

    #[test]
    fn conflict_reports_both_versions() {
        let err = RepositoryError::conflict(3, 5);
        assert!(matches!(
            err,
            RepositoryError::Conflict { expected: 3, actual: 5 }
        ));
        assert!(err.to_string().contains("version 3"));
        assert!(err.to_string().contains("at 5"));
    }

    #[test]
    fn mapping_errors_convert_into_repository_errors() {
        let err: RepositoryError = MappingError::MissingField("items").into();
        assert!(matches!(err, RepositoryError::Mapping(_)));
    }
}
