//! Terminal front-end for the archery simulator.
//!
//! The binary is a thin composition root: it resolves a [`RunConfig`] from
//! the environment and command line, runs a [`Session`], and hands the
//! resulting report to [`presentation`].

pub mod config;
pub mod logging;
pub mod presentation;

pub use config::{Cli, OutputFormat, RunConfig};

use anyhow::{Context, Result};
use archery_core::{PcgRng, Session, SimulationReport};

/// Run the simulation described by `config` and return its report.
pub fn simulate(config: &RunConfig) -> Result<SimulationReport> {
    let settings = config.simulation_config()?;
    let mut rng = match config.seed {
        Some(seed) => PcgRng::seeded(seed),
        None => PcgRng::from_entropy(),
    };

    tracing::info!(
        games = settings.games,
        seed = ?config.seed,
        config = ?config.config_path,
        "simulation configured"
    );

    let session = Session::run(settings.games, &settings.precision, &mut rng)
        .context("Simulation failed")?;
    Ok(session.report())
}

/// Render `report` in the configured output format.
pub fn render(config: &RunConfig, report: &SimulationReport) -> Result<String> {
    match config.format {
        OutputFormat::Text => Ok(presentation::render_text(report, config.per_match)),
        OutputFormat::Json => presentation::render_json(report),
    }
}
