//! Discounts
//!
//! Raw discount fields as supplied with a coupon, the validated [`Discount`] they
//! convert into, and the calculation of how much a discount takes off a total.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

/// Discount fields as supplied on a coupon definition.
///
/// Exactly one of the two fields must be set for the coupon to be usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountTerms {
    /// Whole-number percentage off, expected in `0..=100`
    pub percent_discount: Option<u32>,

    /// Fixed amount off, expected to be non-negative
    pub amount_discount: Option<Decimal>,
}

impl DiscountTerms {
    /// Terms for a percentage discount (e.g. `15` for "15% off").
    pub const fn percent(percent: u32) -> Self {
        Self {
            percent_discount: Some(percent),
            amount_discount: None,
        }
    }

    /// Terms for a fixed amount discount (e.g. "6.00 off").
    pub const fn amount(amount: Decimal) -> Self {
        Self {
            percent_discount: None,
            amount_discount: Some(amount),
        }
    }

    /// True iff exactly one of `percent_discount` and `amount_discount` is set.
    pub const fn is_well_formed(&self) -> bool {
        self.percent_discount.is_some() != self.amount_discount.is_some()
    }
}

/// A validated discount.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Discount {
    /// Take a percentage off the relevant total (e.g., "15% off")
    PercentageOff(Percentage),

    /// Take a fixed amount off the relevant total, capped at that total (e.g., "£6 off")
    AmountOff(Decimal),
}

impl Discount {
    /// Convert raw terms into a discount.
    ///
    /// Returns `None` when both or neither field is set, when the percentage is above 100,
    /// or when the amount is negative.
    pub fn from_terms(terms: &DiscountTerms) -> Option<Self> {
        if !terms.is_well_formed() {
            return None;
        }

        match (terms.percent_discount, terms.amount_discount) {
            (Some(percent), None) if percent <= 100 => Some(Discount::PercentageOff(
                Percentage::from(Decimal::from(percent) / Decimal::ONE_HUNDRED),
            )),
            (None, Some(amount)) if amount >= Decimal::ZERO => Some(Discount::AmountOff(amount)),
            _ => None,
        }
    }

    /// Amount this discount takes off `relevant_total`.
    ///
    /// The result never exceeds `relevant_total` and is never negative.
    pub fn amount_on(&self, relevant_total: Decimal) -> Decimal {
        discount_amount(self, relevant_total)
    }
}

/// Calculate the discount a validated discount yields against the total in its scope.
///
/// No rounding is applied.
pub fn discount_amount(discount: &Discount, relevant_total: Decimal) -> Decimal {
    let amount = match discount {
        Discount::PercentageOff(percent) => *percent * relevant_total,
        Discount::AmountOff(amount) => (*amount).min(relevant_total),
    };

    amount.max(Decimal::ZERO)
}
