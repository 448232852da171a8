//! Entity trait: identity + continuity across state changes.

use crate::id::IdentityValue;

/// Entity marker + minimal interface.
///
/// An entity carries one immutable identity assigned at construction and
/// never reassigned. Its attributes change only through declared behavior
/// methods, each of which is transactional: it either completes and leaves
/// the entity in a new valid state, or fails with
/// [`DomainError::RuleViolation`](crate::DomainError) and leaves the
/// observable state untouched.
///
/// Note that structural `PartialEq` (useful for snapshot assertions in tests)
/// is a different relation from entity equality — for the latter, use
/// [`same_identity`](Entity::same_identity).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: IdentityValue;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Entity equality: by identity only, independent of attribute state.
    ///
    /// Two entities sharing an identity are the same entity even if one is
    /// stale.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
