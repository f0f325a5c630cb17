//! Archery simulator binary.
//!
//! ```bash
//! # 20,000 matches, time-seeded
//! cargo run -p archery-client
//!
//! # Reproducible run with per-match line items
//! cargo run -p archery-client -- --games 100 --seed 7 --per-match
//! ```

use anyhow::Result;
use archery_client::{Cli, RunConfig, logging};
use clap::Parser;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init()?;

    let config = RunConfig::from_env().with_cli(cli);
    let report = archery_client::simulate(&config)?;
    println!("{}", archery_client::render(&config, &report)?);

    Ok(())
}
