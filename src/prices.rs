//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::Decimal;

use crate::errors::DomainError;

/// A non-negative monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    amount: Decimal,
}

impl Price {
    /// Zero.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Creates a new Price.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `amount` is negative.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation("Price cannot be negative"));
        }

        Ok(Self { amount })
    }

    /// The wrapped amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.amount
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.amount, f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}
