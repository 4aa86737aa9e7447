//! Evaluate Example
//!
//! Loads a fixture set, selects the best coupon for its cart and prints every coupon's outcome.
//!
//! Use `-f` to load a fixture set by name
//! Use `-d` to read fixture sets from another directory
//! Use `-l` to set the log filter when `RUST_LOG` is unset

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lattice_coupons::{
    coupons::Coupon,
    fixtures::Fixture,
    selector::{CouponOutcome, CouponSelector},
    utils::DemoArgs,
};

/// Evaluate Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut fixture = Fixture::with_base_path(&args.fixtures_dir);
    fixture.load(&args.fixture)?;

    info!(fixture = %args.fixture, "loaded fixture set");

    let start = Instant::now();
    let evaluation = CouponSelector::evaluate(fixture.cart(), fixture.catalog());
    let elapsed = start.elapsed().as_secs_f32();

    let mut builder = Builder::default();
    builder.push_record(["", "Coupon", "Categories", "Outcome"]);

    for (key, outcome) in &evaluation.outcomes {
        let marker = if evaluation.result.applied_coupon == Some(*key) {
            "*"
        } else {
            ""
        };

        let categories = fixture
            .catalog()
            .get(*key)
            .map(|coupon: &Coupon| coupon.categories().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();

        let outcome = match outcome {
            CouponOutcome::Candidate(discount) => format!("{discount} off"),
            CouponOutcome::InvalidDiscount => "invalid discount".to_string(),
            CouponOutcome::OverlappingCategories => "set categories overlap".to_string(),
            CouponOutcome::Ineligible(reason) => reason.to_string(),
        };

        builder.push_record([
            marker.to_string(),
            fixture.coupon_name(*key).unwrap_or_default().to_string(),
            categories,
            outcome,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::first(), Alignment::center());

    let result = evaluation.result;

    println!("{table}");
    println!();
    println!("Subtotal:    {}", result.subtotal);
    println!("Discount:    {}", result.best_discount);
    println!("Final price: {}", result.final_price);
    println!("\nSolution: {elapsed}s");

    Ok(())
}
