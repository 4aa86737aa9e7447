//! Cart Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::CartItem};

/// Cart item from YAML
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Price as a decimal string (e.g., "2.00")
    pub price: String,

    /// Item category
    pub category: String,
}

impl TryFrom<CartItemFixture> for CartItem {
    type Error = FixtureError;

    fn try_from(fixture: CartItemFixture) -> Result<Self, Self::Error> {
        Ok(CartItem::new(parse_amount(&fixture.price)?, fixture.category))
    }
}

/// Parse a decimal amount string (e.g., "2.00" or "6") into a `Decimal`
///
/// # Errors
///
/// Returns [`FixtureError::InvalidAmount`] if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))
}
