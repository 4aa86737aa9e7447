//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{SubtotalError, subtotal},
};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item has a negative price (index, price).
    #[error("Item {0} has negative price {1}")]
    NegativePrice(usize, Decimal),

    /// An item has no category (index).
    #[error("Item {0} has an empty category")]
    EmptyCategory(usize),

    /// The cart total overflows when adding an item (index).
    #[error("Cart total overflows at item {0}")]
    TotalOverflow(usize),
}

impl From<SubtotalError> for CartError {
    fn from(error: SubtotalError) -> Self {
        match error {
            SubtotalError::Overflow(i) => CartError::TotalOverflow(i),
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    subtotal: Decimal,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            subtotal: Decimal::ZERO,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if an item has a negative price or an empty category, or if
    /// the cart's total does not fit in a `Decimal`.
    pub fn with_items(items: impl Into<Vec<CartItem>>) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            if item.price() < Decimal::ZERO {
                Err(CartError::NegativePrice(i, item.price()))
            } else if item.category().trim().is_empty() {
                Err(CartError::EmptyCategory(i))
            } else {
                Ok(())
            }
        })?;

        let subtotal = subtotal(&items)?;

        Ok(Cart { items, subtotal })
    }

    /// Subtotal of the cart.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Items in the cart, in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
