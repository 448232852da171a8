//! Value objects of the orders context.

use domainkit_core::{DomainError, DomainResult, ValueObject, ValueObjectFactory};
use serde::{Deserialize, Serialize};

/// Maximum email length (per RFC 5321).
const EMAIL_MAX_LENGTH: usize = 254;

/// A validated, normalized email address.
///
/// Construction normalizes (trim + ASCII lowercase) before validating, so
/// logically-equal inputs always produce equal instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with normalization and validation.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        Self::create(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain part of the address.
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }

    fn is_valid_format(email: &str) -> bool {
        // Exactly one @, non-empty local and dotted domain.
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || local.len() > 64 {
            return false;
        }
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }
        true
    }
}

impl ValueObject for Email {}

impl ValueObjectFactory for Email {
    type Raw = String;

    fn create(raw: String) -> DomainResult<Self> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::validation("email must not be empty"));
        }
        if normalized.len() > EMAIL_MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }
        if !Self::is_valid_format(&normalized) {
            return Err(DomainError::validation(format!(
                "'{raw}' is not a valid email address"
            )));
        }

        Ok(Self(normalized))
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A monetary amount in the smallest currency unit (cents).
///
/// Arithmetic is checked: overflow is a rule violation, never a wrap. Every
/// operation returns a new instance.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::rule("money addition overflows"))
    }

    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::rule("money subtraction underflows"))
    }

    /// Multiply by a quantity (e.g. unit price × line quantity).
    pub fn times(self, quantity: Quantity) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity.get()))
            .map(Money)
            .ok_or_else(|| DomainError::rule("money multiplication overflows"))
    }
}

impl ValueObject for Money {}

/// A strictly positive count of units.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(units: u32) -> DomainResult<Self> {
        Self::create(units)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl ValueObjectFactory for Quantity {
    type Raw = u32;

    fn create(raw: u32) -> DomainResult<Self> {
        if raw == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self(raw))
    }
}
