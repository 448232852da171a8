//! Strongly-typed identifiers.
//!
//! Identities are opaque, comparable tokens. Equality and hashing go through
//! the token value only; there is no mutation API. Downstream contexts define
//! their own identifier types with the [`identity!`] macro so one aggregate
//! can reference another by identity without access to its internals.

use uuid::Uuid;

/// Contract for identity tokens.
///
/// An identity either wraps an externally-issued token or generates a new
/// globally-unique one. Once created it never changes. Identities key shared
/// stores, so they must be safe to move and share across threads.
pub trait IdentityValue: Clone + Eq + core::hash::Hash + core::fmt::Debug + Send + Sync {
    /// Generate a new globally-unique identity.
    fn generate() -> Self;

    /// The wrapped token.
    fn as_uuid(&self) -> &Uuid;
}

/// Define a strongly-typed identifier newtype.
///
/// Generates a serde-transparent UUID wrapper implementing
/// [`IdentityValue`], `Display`, `From<Uuid>`/`Into<Uuid>` and `FromStr`
/// (failing with [`DomainError::InvalidId`](crate::error::DomainError)).
///
/// ```ignore
/// domainkit_core::identity!(OrderId);
///
/// let a = OrderId::new();              // fresh, globally unique
/// let b = OrderId::from_uuid(a.into()); // wrap an externally-issued token
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! identity {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in
            /// tests for determinism.
            pub fn new() -> Self {
                Self(::uuid::Uuid::now_v7())
            }

            /// Wrap an externally-issued token.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::id::IdentityValue for $name {
            fn generate() -> Self {
                Self::new()
            }

            fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = <::uuid::Uuid as core::str::FromStr>::from_str(s)
                    .map_err(|e| $crate::error::DomainError::invalid_id(format!(
                        "{}: {}",
                        stringify!($name),
                        e
                    )))?;
                Ok(Self(uuid))
            }
        }
    };
}
