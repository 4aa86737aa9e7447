//! Coupon Catalog
//!
//! Ordered collection of independently evaluable coupons and coupon sets.

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::coupons::{Coupon, CouponKey, MultiCategoryCoupon, SingleCategoryCoupon};

/// Multi-category coupons supplied together and validated jointly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponSet {
    coupons: SmallVec<[MultiCategoryCoupon; 4]>,
}

impl CouponSet {
    /// Create a set from its coupons, in order.
    pub fn new(coupons: impl IntoIterator<Item = MultiCategoryCoupon>) -> Self {
        Self {
            coupons: coupons.into_iter().collect(),
        }
    }

    /// Iterate over the coupons in the set.
    pub fn iter(&self) -> impl Iterator<Item = &MultiCategoryCoupon> {
        self.coupons.iter()
    }

    /// Number of coupons in the set.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Check if the set has no coupons.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl<'s> IntoIterator for &'s CouponSet {
    type Item = &'s MultiCategoryCoupon;
    type IntoIter = std::slice::Iter<'s, MultiCategoryCoupon>;

    fn into_iter(self) -> Self::IntoIter {
        self.coupons.iter()
    }
}

/// One independently evaluable unit of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// A single-category coupon, evaluated on its own
    Single(CouponKey),

    /// A coupon set, rejected as a whole if its categories overlap
    Set(SmallVec<[CouponKey; 4]>),
}

/// Coupon Catalog
#[derive(Debug, Clone, Default)]
pub struct CouponCatalog {
    coupons: SlotMap<CouponKey, Coupon>,
    entries: Vec<CatalogEntry>,
}

impl CouponCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a flat list of single-category coupons.
    pub fn from_singles(coupons: impl IntoIterator<Item = SingleCategoryCoupon>) -> Self {
        let mut catalog = Self::new();

        for coupon in coupons {
            catalog.push_single(coupon);
        }

        catalog
    }

    /// Create a catalog holding one coupon set.
    pub fn from_set(set: CouponSet) -> Self {
        let mut catalog = Self::new();
        catalog.push_set(set);

        catalog
    }

    /// Append a single-category coupon and return its key.
    pub fn push_single(&mut self, coupon: SingleCategoryCoupon) -> CouponKey {
        let key = self.coupons.insert(Coupon::Single(coupon));
        self.entries.push(CatalogEntry::Single(key));

        key
    }

    /// Append a coupon set and return the keys of its coupons, in order.
    pub fn push_set(&mut self, set: CouponSet) -> SmallVec<[CouponKey; 4]> {
        let keys: SmallVec<[CouponKey; 4]> = set
            .coupons
            .into_iter()
            .map(|coupon| self.coupons.insert(Coupon::Multi(coupon)))
            .collect();

        self.entries.push(CatalogEntry::Set(keys.clone()));

        keys
    }

    /// Look up a coupon by key.
    pub fn get(&self, key: CouponKey) -> Option<&Coupon> {
        self.coupons.get(key)
    }

    /// Catalog entries, in the order they were added.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Total number of coupons across all entries.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Check if the catalog holds no coupons.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}
