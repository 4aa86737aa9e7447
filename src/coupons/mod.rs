//! Coupons
//!
//! Coupon definitions are a tagged union of two shapes: a coupon restricted to one
//! category, and a coupon spanning several categories that is evaluated against
//! their combined totals.

use rust_decimal::Decimal;
use slotmap::new_key_type;
use smallvec::SmallVec;
use thiserror::Error;

use crate::discounts::DiscountTerms;

pub mod catalog;
pub mod validation;

new_key_type! {
    /// Coupon Key
    pub struct CouponKey;
}

/// Coupon metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponMeta {
    /// Coupon name
    pub name: String,
}

/// Errors raised while constructing a coupon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// A multi-category coupon was given no categories.
    #[error("multi-category coupon must list at least one category")]
    NoCategories,

    /// A category was listed more than once on the same coupon.
    #[error("category {0:?} is listed more than once")]
    DuplicateCategory(String),
}

/// A coupon restricted to a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleCategoryCoupon {
    /// Category the coupon applies to
    pub category: String,

    /// Discount fields, as supplied
    pub discount: DiscountTerms,

    /// Minimum number of items in the category
    pub minimum_num_items_required: u32,

    /// Minimum total price of items in the category
    pub minimum_amount_required: Decimal,
}

impl SingleCategoryCoupon {
    /// Create a coupon for `category` with no minimum requirements.
    pub fn new(category: impl Into<String>, discount: DiscountTerms) -> Self {
        Self {
            category: category.into(),
            discount,
            minimum_num_items_required: 0,
            minimum_amount_required: Decimal::ZERO,
        }
    }

    /// Require at least `items` items in the category.
    #[must_use]
    pub fn with_minimum_items(mut self, items: u32) -> Self {
        self.minimum_num_items_required = items;
        self
    }

    /// Require the category to total at least `amount`.
    #[must_use]
    pub fn with_minimum_amount(mut self, amount: Decimal) -> Self {
        self.minimum_amount_required = amount;
        self
    }
}

/// A coupon spanning several distinct categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiCategoryCoupon {
    categories: SmallVec<[String; 4]>,

    /// Discount fields, as supplied
    pub discount: DiscountTerms,

    /// Minimum number of items across the listed categories
    pub minimum_num_items_required: Option<u32>,

    /// Minimum combined total across the listed categories
    pub minimum_amount_required: Option<Decimal>,
}

impl MultiCategoryCoupon {
    /// Create a multi-category coupon with no minimum requirements.
    ///
    /// # Errors
    ///
    /// - [`CouponError::NoCategories`]: `categories` was empty.
    /// - [`CouponError::DuplicateCategory`]: a category was listed twice.
    pub fn new<S: Into<String>>(
        categories: impl IntoIterator<Item = S>,
        discount: DiscountTerms,
    ) -> Result<Self, CouponError> {
        let mut listed: SmallVec<[String; 4]> = SmallVec::new();

        for category in categories {
            let category = category.into();

            if listed.contains(&category) {
                return Err(CouponError::DuplicateCategory(category));
            }

            listed.push(category);
        }

        if listed.is_empty() {
            return Err(CouponError::NoCategories);
        }

        Ok(Self {
            categories: listed,
            discount,
            minimum_num_items_required: None,
            minimum_amount_required: None,
        })
    }

    /// Require at least `items` items across the listed categories.
    #[must_use]
    pub fn with_minimum_items(mut self, items: u32) -> Self {
        self.minimum_num_items_required = Some(items);
        self
    }

    /// Require the listed categories to total at least `amount` combined.
    #[must_use]
    pub fn with_minimum_amount(mut self, amount: Decimal) -> Self {
        self.minimum_amount_required = Some(amount);
        self
    }

    /// Listed categories, in the order they were supplied.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// A coupon of either shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coupon {
    /// Single-category coupon
    Single(SingleCategoryCoupon),

    /// Multi-category coupon
    Multi(MultiCategoryCoupon),
}

impl Coupon {
    /// Discount fields, as supplied.
    pub fn discount_terms(&self) -> &DiscountTerms {
        match self {
            Coupon::Single(coupon) => &coupon.discount,
            Coupon::Multi(coupon) => &coupon.discount,
        }
    }

    /// Categories this coupon is scoped to.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        let categories = match self {
            Coupon::Single(coupon) => std::slice::from_ref(&coupon.category),
            Coupon::Multi(coupon) => coupon.categories(),
        };

        categories.iter().map(String::as_str)
    }

    /// Minimum item count, treating an absent requirement as zero.
    pub fn minimum_items(&self) -> u32 {
        match self {
            Coupon::Single(coupon) => coupon.minimum_num_items_required,
            Coupon::Multi(coupon) => coupon.minimum_num_items_required.unwrap_or(0),
        }
    }

    /// Minimum amount, treating an absent requirement as zero.
    pub fn minimum_amount(&self) -> Decimal {
        match self {
            Coupon::Single(coupon) => coupon.minimum_amount_required,
            Coupon::Multi(coupon) => coupon.minimum_amount_required.unwrap_or(Decimal::ZERO),
        }
    }
}

impl From<SingleCategoryCoupon> for Coupon {
    fn from(coupon: SingleCategoryCoupon) -> Self {
        Coupon::Single(coupon)
    }
}

impl From<MultiCategoryCoupon> for Coupon {
    fn from(coupon: MultiCategoryCoupon) -> Self {
        Coupon::Multi(coupon)
    }
}
