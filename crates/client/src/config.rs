//! CLI runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use archery_content::ConfigLoader;
use archery_core::SimulationConfig;
use clap::{Parser, ValueEnum};

pub const GAMES_VAR: &str = "ARCHERY_GAMES";
pub const SEED_VAR: &str = "ARCHERY_SEED";
pub const FORMAT_VAR: &str = "ARCHERY_FORMAT";
pub const PER_MATCH_VAR: &str = "ARCHERY_PER_MATCH";

/// Simulate archery matches between two teams of five and report
/// cross-match statistics.
#[derive(Debug, Parser)]
#[command(name = "archery", version, long_about = None)]
pub struct Cli {
    /// Number of matches to simulate [env: ARCHERY_GAMES] [default: 20000]
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub games: Option<u32>,

    /// Seed for a reproducible run [env: ARCHERY_SEED]
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// TOML file with the game count and precision tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format [env: ARCHERY_FORMAT] [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print per-match line items in text output [env: ARCHERY_PER_MATCH]
    #[arg(long)]
    pub per_match: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled summary for terminals
    #[default]
    Text,
    /// Full report as pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Settings for a single `archery` invocation.
///
/// Precedence, highest first: command-line flags, environment variables,
/// the `--config` file, built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub games: Option<u32>,
    pub seed: Option<u64>,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub per_match: bool,
}

impl RunConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARCHERY_GAMES` - Number of matches (default: config file or 20000)
    /// - `ARCHERY_SEED` - Generator seed (default: time-seeded)
    /// - `ARCHERY_FORMAT` - `text` or `json` (default: text)
    /// - `ARCHERY_PER_MATCH` - Print per-match line items (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            games: read_env(&lookup, GAMES_VAR),
            seed: read_env(&lookup, SEED_VAR),
            ..Self::default()
        };

        if let Some(format) = read_env(&lookup, FORMAT_VAR) {
            config.format = format;
        }

        if let Some(enable) = read_env::<bool, _>(&lookup, PER_MATCH_VAR) {
            config.per_match = enable;
        } else if lookup(PER_MATCH_VAR).is_some() {
            // Setting the variable without a boolean value counts as "true"
            config.per_match = true;
        }

        config
    }

    /// Overlay command-line flags on top of this configuration.
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if cli.games.is_some() {
            self.games = cli.games;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.config.is_some() {
            self.config_path = cli.config;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        self.per_match |= cli.per_match;
        self
    }

    /// Resolve the engine settings: config file first, then the game count override.
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(games) = self.games {
            config = config.with_games(games);
        }

        config
            .validate()
            .context("Invalid simulation settings")?;
        Ok(config)
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
