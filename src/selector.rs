//! Coupon Selector
//!
//! Evaluates every coupon in a catalog against a cart and picks the single coupon
//! with the largest discount. Coupons never stack: the subtotal is reduced at most once.
//!
//! Ties keep the first coupon reached in catalog order, and a coupon worth nothing is
//! never applied.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    cart::Cart,
    categories::{CategoryAggregates, aggregate},
    coupons::{
        CouponKey,
        catalog::{CatalogEntry, CouponCatalog},
        validation::{validate_category_disjointness, validated_discount},
    },
    eligibility::{Ineligibility, check_eligibility},
};

/// Outcome of evaluating a single coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponOutcome {
    /// Eligible, yielding this discount
    Candidate(Decimal),

    /// Both or neither discount field set, or a field out of range
    InvalidDiscount,

    /// Part of a coupon set whose categories overlap
    OverlappingCategories,

    /// Structurally valid but the cart does not qualify
    Ineligible(Ineligibility),
}

/// Final pricing of a cart with at most one coupon applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Sum of every item price in the cart
    pub subtotal: Decimal,

    /// Discount of the applied coupon, zero if none
    pub best_discount: Decimal,

    /// The winning coupon, if any
    pub applied_coupon: Option<CouponKey>,

    /// `subtotal - best_discount`
    pub final_price: Decimal,
}

impl EvaluationResult {
    fn without_discount(subtotal: Decimal) -> Self {
        Self {
            subtotal,
            best_discount: Decimal::ZERO,
            applied_coupon: None,
            final_price: subtotal,
        }
    }

    /// Discount as a share of the subtotal, `None` for a zero subtotal.
    pub fn savings_ratio(&self) -> Option<Percentage> {
        if self.subtotal.is_zero() {
            return None;
        }

        self.best_discount
            .checked_div(self.subtotal)
            .map(Percentage::from)
    }
}

/// Evaluation result along with the outcome of every coupon considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Final pricing
    pub result: EvaluationResult,

    /// Outcome per coupon, in catalog order
    pub outcomes: Vec<(CouponKey, CouponOutcome)>,
}

impl Evaluation {
    /// Outcome recorded for a coupon.
    pub fn outcome(&self, key: CouponKey) -> Option<CouponOutcome> {
        self.outcomes
            .iter()
            .find(|(outcome_key, _)| *outcome_key == key)
            .map(|(_, outcome)| *outcome)
    }
}

/// Best-coupon selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct CouponSelector;

impl CouponSelector {
    /// Select the best coupon for the cart and price it.
    pub fn select_best(cart: &Cart, catalog: &CouponCatalog) -> EvaluationResult {
        Self::evaluate(cart, catalog).result
    }

    /// Evaluate every coupon in the catalog against the cart.
    #[tracing::instrument(
        name = "coupons.evaluate",
        skip_all,
        fields(items = cart.len(), coupons = catalog.len())
    )]
    pub fn evaluate(cart: &Cart, catalog: &CouponCatalog) -> Evaluation {
        let subtotal = cart.subtotal();
        let aggregates = aggregate(cart.items());

        let mut outcomes = Vec::with_capacity(catalog.len());

        for entry in catalog.entries() {
            match entry {
                CatalogEntry::Single(key) => {
                    outcomes.extend(evaluate_coupon(catalog, *key, &aggregates));
                }
                CatalogEntry::Set(keys) => {
                    if set_is_disjoint(catalog, keys) {
                        outcomes.extend(
                            keys.iter()
                                .filter_map(|key| evaluate_coupon(catalog, *key, &aggregates)),
                        );
                    } else {
                        debug!(coupons = keys.len(), "coupon set rejected: categories overlap");

                        outcomes.extend(
                            keys.iter()
                                .map(|key| (*key, CouponOutcome::OverlappingCategories)),
                        );
                    }
                }
            }
        }

        let result = best_of(subtotal, &outcomes);

        if let Some(key) = result.applied_coupon {
            debug!(?key, discount = %result.best_discount, "coupon applied");
        } else {
            debug!("no coupon applied");
        }

        Evaluation { result, outcomes }
    }
}

fn set_is_disjoint(catalog: &CouponCatalog, keys: &[CouponKey]) -> bool {
    validate_category_disjointness(keys.iter().filter_map(|key| catalog.get(*key)))
}

fn evaluate_coupon(
    catalog: &CouponCatalog,
    key: CouponKey,
    aggregates: &CategoryAggregates,
) -> Option<(CouponKey, CouponOutcome)> {
    let coupon = catalog.get(key)?;

    let Some(discount) = validated_discount(coupon) else {
        debug!(?key, "coupon excluded: invalid discount");

        return Some((key, CouponOutcome::InvalidDiscount));
    };

    let outcome = match check_eligibility(coupon, aggregates) {
        Ok(relevant) => CouponOutcome::Candidate(discount.amount_on(relevant.total_price)),
        Err(reason) => {
            debug!(?key, %reason, "coupon excluded: ineligible");

            CouponOutcome::Ineligible(reason)
        }
    };

    Some((key, outcome))
}

/// Linear scan for the strictly greatest candidate discount.
fn best_of(subtotal: Decimal, outcomes: &[(CouponKey, CouponOutcome)]) -> EvaluationResult {
    let mut best: Option<(CouponKey, Decimal)> = None;

    for (key, outcome) in outcomes {
        let CouponOutcome::Candidate(discount) = outcome else {
            continue;
        };

        let current = best.map_or(Decimal::ZERO, |(_, amount)| amount);

        if *discount > current {
            best = Some((*key, *discount));
        }
    }

    match best {
        Some((key, best_discount)) => EvaluationResult {
            subtotal,
            best_discount,
            applied_coupon: Some(key),
            final_price: subtotal - best_discount,
        },
        None => EvaluationResult::without_discount(subtotal),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        coupons::{MultiCategoryCoupon, SingleCategoryCoupon, catalog::CouponSet},
        discounts::DiscountTerms,
        items::CartItem,
    };

    use super::*;

    fn test_cart() -> Result<Cart, crate::cart::CartError> {
        Cart::with_items([
            CartItem::new(Decimal::new(200, 2), "fruit"),
            CartItem::new(Decimal::new(800, 2), "fruit"),
            CartItem::new(Decimal::new(2000, 2), "toy"),
            CartItem::new(Decimal::new(500, 2), "clothing"),
        ])
    }

    #[test]
    fn empty_catalog_applies_no_discount() -> TestResult {
        let cart = test_cart()?;

        let result = CouponSelector::select_best(&cart, &CouponCatalog::new());

        assert_eq!(
            result,
            EvaluationResult::without_discount(Decimal::new(3500, 2))
        );

        Ok(())
    }

    #[test]
    fn empty_cart_applies_no_discount() {
        let catalog = CouponCatalog::from_singles([SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms::percent(15),
        )]);

        let evaluation = CouponSelector::evaluate(&Cart::new(), &catalog);

        assert_eq!(evaluation.result.best_discount, Decimal::ZERO);
        assert_eq!(evaluation.result.final_price, Decimal::ZERO);
        assert_eq!(evaluation.result.applied_coupon, None);
        assert!(matches!(
            evaluation.outcomes.as_slice(),
            [(_, CouponOutcome::Ineligible(Ineligibility::MissingCategory))]
        ));
    }

    #[test]
    fn picks_largest_discount() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        let fruit =
            catalog.push_single(SingleCategoryCoupon::new("fruit", DiscountTerms::percent(15)));
        let toy = catalog.push_single(SingleCategoryCoupon::new("toy", DiscountTerms::percent(10)));

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert_eq!(
            evaluation.outcome(fruit),
            Some(CouponOutcome::Candidate(Decimal::new(150, 2)))
        );
        assert_eq!(
            evaluation.outcome(toy),
            Some(CouponOutcome::Candidate(Decimal::new(200, 2)))
        );
        assert_eq!(evaluation.result.applied_coupon, Some(toy));
        assert_eq!(evaluation.result.final_price, Decimal::new(3300, 2));

        Ok(())
    }

    #[test]
    fn ties_keep_first_coupon_in_catalog_order() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        let first = catalog.push_single(SingleCategoryCoupon::new(
            "toy",
            DiscountTerms::amount(Decimal::new(2, 0)),
        ));
        let second =
            catalog.push_single(SingleCategoryCoupon::new("toy", DiscountTerms::percent(10)));

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert_eq!(
            evaluation.outcome(second),
            Some(CouponOutcome::Candidate(Decimal::new(2, 0)))
        );
        assert_eq!(evaluation.result.applied_coupon, Some(first));

        Ok(())
    }

    #[test]
    fn zero_discount_candidate_is_not_applied() -> TestResult {
        let cart = test_cart()?;
        let catalog = CouponCatalog::from_singles([SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms::percent(0),
        )]);

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert!(matches!(
            evaluation.outcomes.as_slice(),
            [(_, CouponOutcome::Candidate(discount))] if discount.is_zero()
        ));
        assert_eq!(evaluation.result.applied_coupon, None);

        Ok(())
    }

    #[test]
    fn invalid_discount_is_excluded() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        let invalid = catalog.push_single(SingleCategoryCoupon::new(
            "toy",
            DiscountTerms {
                percent_discount: Some(50),
                amount_discount: Some(Decimal::TEN),
            },
        ));
        let valid =
            catalog.push_single(SingleCategoryCoupon::new("fruit", DiscountTerms::percent(15)));

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert_eq!(
            evaluation.outcome(invalid),
            Some(CouponOutcome::InvalidDiscount)
        );
        assert_eq!(evaluation.result.applied_coupon, Some(valid));
        assert_eq!(evaluation.result.best_discount, Decimal::new(150, 2));

        Ok(())
    }

    #[test]
    fn out_of_range_percent_is_excluded() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        let keys = catalog.push_set(CouponSet::new([MultiCategoryCoupon::new(
            ["toy"],
            DiscountTerms::percent(150),
        )?]));

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert_eq!(
            keys.first().and_then(|key| evaluation.outcome(*key)),
            Some(CouponOutcome::InvalidDiscount)
        );
        assert_eq!(evaluation.result.applied_coupon, None);

        Ok(())
    }

    #[test]
    fn cart_at_decimal_limit_evaluates() -> TestResult {
        let cart = Cart::with_items([
            CartItem::new(Decimal::MAX - Decimal::TEN, "toy"),
            CartItem::new(Decimal::TEN, "fruit"),
        ])?;
        let mut catalog = CouponCatalog::new();

        catalog.push_single(SingleCategoryCoupon::new(
            "fruit",
            DiscountTerms::amount(Decimal::ONE_HUNDRED),
        ));
        let toy = catalog.push_single(SingleCategoryCoupon::new(
            "toy",
            DiscountTerms::amount(Decimal::ONE_THOUSAND),
        ));

        let result = CouponSelector::select_best(&cart, &catalog);

        assert_eq!(result.subtotal, Decimal::MAX);
        assert_eq!(result.applied_coupon, Some(toy));
        assert_eq!(result.final_price, Decimal::MAX - Decimal::ONE_THOUSAND);

        Ok(())
    }

    #[test]
    fn overlapping_set_contributes_no_candidates() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        let keys = catalog.push_set(CouponSet::new([
            MultiCategoryCoupon::new(["fruit", "clothing"], DiscountTerms::percent(90))?,
            MultiCategoryCoupon::new(["fruit"], DiscountTerms::percent(90))?,
            MultiCategoryCoupon::new(["toy"], DiscountTerms::percent(90))?,
        ]));

        let evaluation = CouponSelector::evaluate(&cart, &catalog);

        assert_eq!(evaluation.outcomes.len(), 3);
        assert!(keys.iter().all(|key| {
            evaluation.outcome(*key) == Some(CouponOutcome::OverlappingCategories)
        }));
        assert_eq!(
            evaluation.result,
            EvaluationResult::without_discount(Decimal::new(3500, 2))
        );

        Ok(())
    }

    #[test]
    fn overlap_is_scoped_to_each_set() -> TestResult {
        let cart = test_cart()?;
        let mut catalog = CouponCatalog::new();

        catalog.push_set(CouponSet::new([MultiCategoryCoupon::new(
            ["fruit"],
            DiscountTerms::percent(10),
        )?]));
        let second = catalog.push_set(CouponSet::new([MultiCategoryCoupon::new(
            ["fruit", "toy"],
            DiscountTerms::percent(10),
        )?]));

        let result = CouponSelector::select_best(&cart, &catalog);

        assert_eq!(result.applied_coupon, second.first().copied());
        assert_eq!(result.best_discount, Decimal::new(300, 2));

        Ok(())
    }

    #[test]
    fn savings_ratio_is_share_of_subtotal() -> TestResult {
        let cart = Cart::with_items([CartItem::new(Decimal::new(2000, 2), "toy")])?;
        let catalog = CouponCatalog::from_singles([SingleCategoryCoupon::new(
            "toy",
            DiscountTerms::percent(25),
        )]);

        let result = CouponSelector::select_best(&cart, &catalog);

        assert_eq!(
            result.savings_ratio(),
            Some(Percentage::from(Decimal::new(25, 2)))
        );
        assert_eq!(
            EvaluationResult::without_discount(Decimal::ZERO).savings_ratio(),
            None
        );

        Ok(())
    }
}
