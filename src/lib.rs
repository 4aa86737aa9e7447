//! Lattice Coupons
//!
//! Best single-coupon selection for a cart: validates coupon definitions, aggregates the
//! cart by category, checks eligibility, and applies the one coupon worth the most.

pub mod cart;
pub mod categories;
pub mod coupons;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod selector;
pub mod utils;
