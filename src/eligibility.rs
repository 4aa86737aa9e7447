//! Eligibility
//!
//! Decides whether a cart meets a coupon's minimum item and amount thresholds.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    categories::{CategoryAggregate, CategoryAggregates},
    coupons::Coupon,
};

/// Why a coupon is not eligible for a cart.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Ineligibility {
    /// None of the coupon's categories are in the cart.
    #[error("no items in the coupon's categories")]
    MissingCategory,

    /// Too few items in the coupon's categories.
    #[error("requires {required} items, cart has {actual}")]
    BelowMinimumItems {
        /// Minimum number of items
        required: u32,
        /// Items present
        actual: u32,
    },

    /// The coupon's categories do not total enough.
    #[error("requires a total of {required}, cart has {actual}")]
    BelowMinimumAmount {
        /// Minimum total
        required: Decimal,
        /// Total present
        actual: Decimal,
    },
}

/// The aggregate a coupon is judged and discounted against.
///
/// For a single-category coupon this is that category's aggregate; for a
/// multi-category coupon it is the combined aggregate of every listed category
/// present in the cart. `None` if none are present.
pub fn relevant_aggregate(
    coupon: &Coupon,
    aggregates: &CategoryAggregates,
) -> Option<CategoryAggregate> {
    match coupon {
        Coupon::Single(single) => aggregates.get(&single.category).copied(),
        Coupon::Multi(multi) => aggregates.combined(multi.categories().iter().map(String::as_str)),
    }
}

/// Check a coupon's thresholds against the cart, returning the relevant aggregate when they hold.
///
/// # Errors
///
/// Returns the [`Ineligibility`] reason when a threshold is not met.
pub fn check_eligibility(
    coupon: &Coupon,
    aggregates: &CategoryAggregates,
) -> Result<CategoryAggregate, Ineligibility> {
    let aggregate = relevant_aggregate(coupon, aggregates).ok_or(Ineligibility::MissingCategory)?;

    let required_items = coupon.minimum_items();

    if aggregate.item_count < required_items {
        return Err(Ineligibility::BelowMinimumItems {
            required: required_items,
            actual: aggregate.item_count,
        });
    }

    let required_amount = coupon.minimum_amount();

    if aggregate.total_price < required_amount {
        return Err(Ineligibility::BelowMinimumAmount {
            required: required_amount,
            actual: aggregate.total_price,
        });
    }

    Ok(aggregate)
}

/// True iff the coupon's categories are in the cart and its thresholds are met.
pub fn is_eligible(coupon: &Coupon, aggregates: &CategoryAggregates) -> bool {
    check_eligibility(coupon, aggregates).is_ok()
}
