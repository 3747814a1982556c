//! Wire format for amounts.

use rust_decimal::Decimal;

/// Render `amount` with exactly two decimal places.
pub(crate) fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}
