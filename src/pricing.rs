//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::CartItem;

/// Errors that can occur while summing prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubtotalError {
    /// Adding the item at this index overflowed the running total.
    #[error("total overflows when adding item {0}")]
    Overflow(usize),
}

/// Calculates the subtotal of a list of items, regardless of category.
///
/// An empty list totals to zero.
///
/// # Errors
///
/// - [`SubtotalError::Overflow`]: the sum does not fit in a `Decimal`.
pub fn subtotal(items: &[CartItem]) -> Result<Decimal, SubtotalError> {
    items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (i, item)| {
            total
                .checked_add(item.price())
                .ok_or(SubtotalError::Overflow(i))
        })
}
