//! Lattice Coupons prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    categories::{CategoryAggregate, CategoryAggregates, aggregate},
    coupons::{
        Coupon, CouponError, CouponKey, CouponMeta, MultiCategoryCoupon, SingleCategoryCoupon,
        catalog::{CatalogEntry, CouponCatalog, CouponSet},
        validation::{validate_category_disjointness, validate_discount_shape},
    },
    discounts::{Discount, DiscountTerms, discount_amount},
    eligibility::{Ineligibility, check_eligibility, is_eligible},
    fixtures::{Fixture, FixtureError},
    items::CartItem,
    selector::{CouponOutcome, CouponSelector, Evaluation, EvaluationResult},
};
