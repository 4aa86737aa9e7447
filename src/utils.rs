//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the evaluation demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to use for the cart & coupons
    #[clap(short, long, default_value = "multi_category")]
    pub fixture: String,

    /// Directory holding fixture sets
    #[clap(short = 'd', long, default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is not set
    #[clap(short, long, default_value = "info")]
    pub log_level: String,
}
