//! Category Aggregates
//!
//! Per-category totals built from a cart, and combined totals across a set of categories.

use std::ops::Add;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::items::CartItem;

/// Summed price and item count for one category (or a combination of categories).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    /// Sum of item prices
    pub total_price: Decimal,

    /// Number of items
    pub item_count: u32,
}

impl CategoryAggregate {
    fn record(&mut self, item: &CartItem) {
        self.total_price = self.total_price.saturating_add(item.price());
        self.item_count = self.item_count.saturating_add(1);
    }
}

impl Add for CategoryAggregate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            total_price: self.total_price.saturating_add(rhs.total_price),
            item_count: self.item_count.saturating_add(rhs.item_count),
        }
    }
}

/// Aggregates keyed by category. Only categories present in the cart have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAggregates {
    categories: FxHashMap<String, CategoryAggregate>,
}

impl CategoryAggregates {
    /// Group items by category, summing prices and counting items.
    pub fn from_items<'i>(items: impl IntoIterator<Item = &'i CartItem>) -> Self {
        let mut categories = FxHashMap::<String, CategoryAggregate>::default();

        for item in items {
            match categories.get_mut(item.category()) {
                Some(aggregate) => aggregate.record(item),
                None => {
                    let mut aggregate = CategoryAggregate::default();
                    aggregate.record(item);

                    categories.insert(item.category().to_string(), aggregate);
                }
            }
        }

        Self { categories }
    }

    /// Aggregate for a single category, if it appears in the cart.
    pub fn get(&self, category: &str) -> Option<&CategoryAggregate> {
        self.categories.get(category)
    }

    /// Combined aggregate across every listed category present in the cart.
    ///
    /// Returns `None` when none of the categories appear in the cart.
    pub fn combined<'c>(
        &self,
        categories: impl IntoIterator<Item = &'c str>,
    ) -> Option<CategoryAggregate> {
        categories
            .into_iter()
            .filter_map(|category| self.get(category).copied())
            .reduce(Add::add)
    }

    /// Iterate over `(category, aggregate)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryAggregate)> {
        self.categories
            .iter()
            .map(|(category, aggregate)| (category.as_str(), aggregate))
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if no categories were aggregated.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Group cart items into per-category totals.
///
/// Totals saturate at the `Decimal` bounds. Items from a [`Cart`](crate::cart::Cart) never
/// reach them, since the cart's subtotal is checked when it is built.
pub fn aggregate(items: &[CartItem]) -> CategoryAggregates {
    CategoryAggregates::from_items(items)
}
