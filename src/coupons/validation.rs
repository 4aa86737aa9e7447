//! Coupon Validation
//!
//! Structural checks on coupon definitions. A coupon that fails them is excluded from
//! selection; it is never reported as an error.

use rustc_hash::FxHashSet;

use crate::{
    coupons::{Coupon, MultiCategoryCoupon},
    discounts::Discount,
};

/// A coupon scoped to a list of categories.
pub trait Categorized {
    /// Categories the coupon is scoped to.
    fn category_names(&self) -> impl Iterator<Item = &str>;
}

impl Categorized for Coupon {
    fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories()
    }
}

impl Categorized for MultiCategoryCoupon {
    fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories().iter().map(String::as_str)
    }
}

/// True iff exactly one of the coupon's `percent_discount` / `amount_discount` is set.
pub fn validate_discount_shape(coupon: &Coupon) -> bool {
    coupon.discount_terms().is_well_formed()
}

/// The coupon's validated discount, or `None` if the coupon is structurally invalid.
///
/// A coupon must pass [`validate_discount_shape`], and its percentage must be at most 100
/// or its amount non-negative.
pub fn validated_discount(coupon: &Coupon) -> Option<Discount> {
    if !validate_discount_shape(coupon) {
        return None;
    }

    Discount::from_terms(coupon.discount_terms())
}

/// True iff no category appears on more than one coupon in the group.
///
/// Accepts a [`CouponSet`](crate::coupons::catalog::CouponSet) by reference, or any
/// iterator of coupons. Each coupon lists distinct categories, so a repeat means two
/// coupons overlap.
pub fn validate_category_disjointness<'c, C>(coupons: impl IntoIterator<Item = &'c C>) -> bool
where
    C: Categorized + 'c,
{
    let mut seen = FxHashSet::<&str>::default();

    coupons
        .into_iter()
        .flat_map(|coupon| coupon.category_names())
        .all(|category| seen.insert(category))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        coupons::{SingleCategoryCoupon, catalog::CouponSet},
        discounts::DiscountTerms,
    };

    use super::*;

    #[test]
    fn both_discount_fields_is_invalid() {
        let coupon = Coupon::Single(SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms {
                percent_discount: Some(15),
                amount_discount: Some(Decimal::TEN),
            },
        ));

        assert!(!validate_discount_shape(&coupon));
        assert_eq!(validated_discount(&coupon), None);
    }

    #[test]
    fn neither_discount_field_is_invalid() {
        let coupon = Coupon::Single(SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms::default(),
        ));

        assert!(!validate_discount_shape(&coupon));
        assert_eq!(validated_discount(&coupon), None);
    }

    #[test]
    fn one_discount_field_is_valid() -> TestResult {
        let coupon = Coupon::Multi(MultiCategoryCoupon::new(
            ["toy"],
            DiscountTerms::amount(Decimal::new(6, 0)),
        )?);

        assert!(validate_discount_shape(&coupon));
        assert_eq!(
            validated_discount(&coupon),
            Some(Discount::AmountOff(Decimal::new(6, 0)))
        );

        Ok(())
    }

    #[test]
    fn disjoint_set_is_valid() -> TestResult {
        let set = CouponSet::new([
            MultiCategoryCoupon::new(["clothing", "toy"], DiscountTerms::percent(10))?,
            MultiCategoryCoupon::new(["fruit"], DiscountTerms::percent(15))?,
        ]);

        assert!(validate_category_disjointness(&set));

        Ok(())
    }

    #[test]
    fn overlapping_set_is_invalid() -> TestResult {
        let set = CouponSet::new([
            MultiCategoryCoupon::new(["fruit", "clothing"], DiscountTerms::percent(10))?,
            MultiCategoryCoupon::new(["fruit"], DiscountTerms::percent(15))?,
        ]);

        assert!(!validate_category_disjointness(&set));

        Ok(())
    }

    #[test]
    fn empty_set_is_valid() {
        assert!(validate_category_disjointness(&CouponSet::default()));
    }

    #[test]
    fn out_of_range_discount_passes_shape_but_is_invalid() {
        let coupon = Coupon::Single(SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms::percent(101),
        ));

        assert!(validate_discount_shape(&coupon));
        assert_eq!(validated_discount(&coupon), None);
    }

    #[test]
    fn disjointness_applies_to_mixed_coupons() -> TestResult {
        let fruit = Coupon::from(SingleCategoryCoupon::new("fruit", DiscountTerms::percent(15)));
        let toy = Coupon::from(MultiCategoryCoupon::new(
            ["toy", "clothing"],
            DiscountTerms::percent(10),
        )?);
        let also_fruit = Coupon::from(MultiCategoryCoupon::new(
            ["books", "fruit"],
            DiscountTerms::percent(10),
        )?);

        assert!(validate_category_disjointness([&fruit, &toy]));
        assert!(!validate_category_disjointness([&fruit, &toy, &also_fruit]));

        Ok(())
    }
}
