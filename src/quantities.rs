//! Quantities

use std::{fmt, ops::Deref};

use rust_decimal::Decimal;

use crate::errors::DomainError;

/// A non-negative count of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity {
    value: u32,
}

impl Quantity {
    /// Zero units.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new Quantity.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    /// The wrapped count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Whether this is zero units.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Sum of both quantities, clamped at the largest representable count.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            value: self.value.saturating_add(other.value),
        }
    }

    /// The count as a decimal, for price arithmetic.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(DomainError::validation("Quantity cannot be negative"));
        }

        u32::try_from(value)
            .map(Self::new)
            .map_err(|source| DomainError::validation(format!("Quantity is too large: {source}")))
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Deref for Quantity {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
