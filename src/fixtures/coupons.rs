//! Coupon Fixtures

use serde::Deserialize;

use crate::{
    coupons::{MultiCategoryCoupon, SingleCategoryCoupon},
    discounts::DiscountTerms,
    fixtures::{FixtureError, cart::parse_amount},
};

/// Catalog entry from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEntryFixture {
    /// Single-category coupon, evaluated on its own
    SingleCategory(SingleCouponFixture),

    /// Multi-category coupons evaluated together
    CouponSet {
        /// Coupons in the set, in order
        coupons: Vec<MultiCouponFixture>,
    },
}

/// Single-category coupon from YAML
#[derive(Debug, Deserialize)]
pub struct SingleCouponFixture {
    /// Coupon name
    pub name: String,

    /// Category the coupon applies to
    pub category: String,

    /// Whole-number percentage off
    #[serde(default)]
    pub percent_discount: Option<u32>,

    /// Amount off as a decimal string
    #[serde(default)]
    pub amount_discount: Option<String>,

    /// Minimum number of items in the category
    pub minimum_num_items_required: u32,

    /// Minimum category total as a decimal string
    pub minimum_amount_required: String,
}

/// Multi-category coupon from YAML
#[derive(Debug, Deserialize)]
pub struct MultiCouponFixture {
    /// Coupon name
    pub name: String,

    /// Categories the coupon spans
    pub categories: Vec<String>,

    /// Whole-number percentage off
    #[serde(default)]
    pub percent_discount: Option<u32>,

    /// Amount off as a decimal string
    #[serde(default)]
    pub amount_discount: Option<String>,

    /// Minimum number of items across the categories
    #[serde(default)]
    pub minimum_num_items_required: Option<u32>,

    /// Minimum combined total as a decimal string
    #[serde(default)]
    pub minimum_amount_required: Option<String>,
}

fn discount_terms(
    percent_discount: Option<u32>,
    amount_discount: Option<&str>,
) -> Result<DiscountTerms, FixtureError> {
    Ok(DiscountTerms {
        percent_discount,
        amount_discount: amount_discount.map(parse_amount).transpose()?,
    })
}

impl SingleCouponFixture {
    /// Convert to a name and `SingleCategoryCoupon`
    ///
    /// # Errors
    ///
    /// Returns an error if an amount is not a decimal number.
    pub fn try_into_coupon(self) -> Result<(String, SingleCategoryCoupon), FixtureError> {
        let discount = discount_terms(self.percent_discount, self.amount_discount.as_deref())?;

        let coupon = SingleCategoryCoupon::new(self.category, discount)
            .with_minimum_items(self.minimum_num_items_required)
            .with_minimum_amount(parse_amount(&self.minimum_amount_required)?);

        Ok((self.name, coupon))
    }
}

impl MultiCouponFixture {
    /// Convert to a name and `MultiCategoryCoupon`
    ///
    /// # Errors
    ///
    /// Returns an error if an amount is not a decimal number, or if the categories are
    /// empty or repeated.
    pub fn try_into_coupon(self) -> Result<(String, MultiCategoryCoupon), FixtureError> {
        let discount = discount_terms(self.percent_discount, self.amount_discount.as_deref())?;

        let mut coupon = MultiCategoryCoupon::new(self.categories, discount)?;

        if let Some(items) = self.minimum_num_items_required {
            coupon = coupon.with_minimum_items(items);
        }

        if let Some(amount) = self.minimum_amount_required.as_deref() {
            coupon = coupon.with_minimum_amount(parse_amount(amount)?);
        }

        Ok((self.name, coupon))
    }
}
