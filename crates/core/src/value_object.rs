//! Value object contract: equality by value, construction through a
//! validating factory.
//!
//! Value objects have **no identity** — they are defined entirely by their
//! attribute values. Two value objects with the same normalized attributes
//! are equal.

use crate::error::DomainResult;

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared structurally**. To "change"
/// one, build a new instance; the receiver is never mutated. Keep fields
/// private so [`ValueObjectFactory::create`] (or an inherent constructor that
/// delegates to it) is the only construction path visible to consumers.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Validating factory for value objects built from raw input.
///
/// `create` must:
/// 1. normalize the raw input deterministically (trimming, case-folding, ...)
///    so logically-equal inputs always normalize identically;
/// 2. validate the normalized input against the value's domain rule;
/// 3. on success return a fully-formed immutable instance;
/// 4. on failure return [`DomainError::Validation`](crate::DomainError)
///    without producing an instance — a partially-valid value must never be
///    observable.
pub trait ValueObjectFactory: ValueObject + Sized {
    /// Raw, unvalidated input.
    type Raw;

    fn create(raw: Self::Raw) -> DomainResult<Self>;
}
