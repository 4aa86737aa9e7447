//! Items

use rust_decimal::Decimal;

/// A single item in a cart, tagged with the category it was bought under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartItem {
    price: Decimal,
    category: String,
}

impl CartItem {
    /// Creates a new item with the given price and category
    pub fn new(price: Decimal, category: impl Into<String>) -> Self {
        Self {
            price,
            category: category.into(),
        }
    }

    /// Returns the price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the category of the item
    pub fn category(&self) -> &str {
        &self.category
    }
}
