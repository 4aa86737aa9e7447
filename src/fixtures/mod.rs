//! Fixtures
//!
//! YAML scenario documents holding a cart and a coupon catalog.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::SecondaryMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    coupons::{
        CouponError, CouponKey, CouponMeta,
        catalog::{CouponCatalog, CouponSet},
    },
    fixtures::{cart::CartItemFixture, coupons::CatalogEntryFixture},
    items::CartItem,
};

pub mod cart;
pub mod coupons;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid amount format
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    /// The scenario has no `cart` key
    #[error("Scenario has no cart")]
    MissingCart,

    /// The scenario has no `coupons` key
    #[error("Scenario has no coupons")]
    MissingCoupons,

    /// Two coupons share a name
    #[error("Duplicate coupon name: {0}")]
    DuplicateCoupon(String),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),

    /// Coupon creation error
    #[error("Failed to create coupon: {0}")]
    Coupon(#[from] CouponError),
}

/// Scenario document from YAML
///
/// Both keys must be present; empty lists are allowed.
#[derive(Debug, Deserialize)]
pub struct ScenarioFixture {
    /// Items in the cart
    #[serde(default)]
    pub cart: Option<Vec<CartItemFixture>>,

    /// Catalog entries, in order
    #[serde(default)]
    pub coupons: Option<Vec<CatalogEntryFixture>>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    cart: Cart,
    catalog: CouponCatalog,

    /// Coupon names, and the name -> key mapping for lookups
    coupon_meta: SecondaryMap<CouponKey, CouponMeta>,
    coupon_keys: FxHashMap<String, CouponKey>,
}

/// Coupon names staged while a scenario loads
struct CouponNames {
    meta: SecondaryMap<CouponKey, CouponMeta>,
    keys: FxHashMap<String, CouponKey>,
}

impl CouponNames {
    fn ensure_unique(&self, name: &str) -> Result<(), FixtureError> {
        if self.keys.contains_key(name) {
            return Err(FixtureError::DuplicateCoupon(name.to_string()));
        }

        Ok(())
    }

    fn insert(&mut self, key: CouponKey, name: String) {
        self.keys.insert(name.clone(), key);
        self.meta.insert(key, CouponMeta { name });
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            cart: Cart::new(),
            catalog: CouponCatalog::new(),
            coupon_meta: SecondaryMap::new(),
            coupon_keys: FxHashMap::default(),
        }
    }

    /// Load a scenario from `<base_path>/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the scenario is invalid.
    pub fn load(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_str(&contents)
    }

    /// Load a scenario from a YAML string, replacing the cart and appending to the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, if either the cart or coupons key is
    /// missing, or if an item or coupon is invalid.
    pub fn load_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ScenarioFixture = serde_norway::from_str(contents)?;

        let cart = fixture.cart.ok_or(FixtureError::MissingCart)?;
        let coupons = fixture.coupons.ok_or(FixtureError::MissingCoupons)?;

        let items = cart
            .into_iter()
            .map(CartItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let cart = Cart::with_items(items)?;

        let mut catalog = self.catalog.clone();
        let mut names = CouponNames {
            meta: self.coupon_meta.clone(),
            keys: self.coupon_keys.clone(),
        };

        for entry in coupons {
            match entry {
                CatalogEntryFixture::SingleCategory(coupon_fixture) => {
                    let (name, coupon) = coupon_fixture.try_into_coupon()?;

                    names.ensure_unique(&name)?;

                    let key = catalog.push_single(coupon);
                    names.insert(key, name);
                }
                CatalogEntryFixture::CouponSet { coupons } => {
                    let mut set_names: SmallVec<[String; 4]> = SmallVec::new();
                    let mut set = Vec::with_capacity(coupons.len());

                    for coupon_fixture in coupons {
                        let (name, coupon) = coupon_fixture.try_into_coupon()?;

                        if set_names.contains(&name) {
                            return Err(FixtureError::DuplicateCoupon(name));
                        }

                        names.ensure_unique(&name)?;

                        set_names.push(name);
                        set.push(coupon);
                    }

                    let keys = catalog.push_set(CouponSet::new(set));

                    for (key, name) in keys.into_iter().zip(set_names) {
                        names.insert(key, name);
                    }
                }
            }
        }

        self.cart = cart;
        self.catalog = catalog;
        self.coupon_meta = names.meta;
        self.coupon_keys = names.keys;

        Ok(self)
    }

    /// Load a scenario by name from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load(name)?;

        Ok(fixture)
    }

    /// Get the cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Get the coupon catalog
    pub fn catalog(&self) -> &CouponCatalog {
        &self.catalog
    }

    /// Get a coupon key by its name
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon_key(&self, name: &str) -> Result<CouponKey, FixtureError> {
        self.coupon_keys
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::CouponNotFound(name.to_string()))
    }

    /// Get the name of a coupon
    pub fn coupon_name(&self, key: CouponKey) -> Option<&str> {
        self.coupon_meta.get(key).map(|meta| meta.name.as_str())
    }

    /// Get the coupon metadata map
    pub fn coupon_meta_map(&self) -> &SecondaryMap<CouponKey, CouponMeta> {
        &self.coupon_meta
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
