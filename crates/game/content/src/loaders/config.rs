//! Simulation configuration loader.

use std::path::Path;

use anyhow::Context;
use archery_core::SimulationConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for simulation configuration from TOML files.
///
/// Every key is optional; missing keys fall back to
/// [`SimulationConfig::default`]. A minimal file looks like:
///
/// ```toml
/// games = 500
///
/// [precision.female]
/// central = 0.30
/// intermediate = 0.38
/// outside = 0.27
/// miss = 0.05
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SimulationConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse and validate config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<SimulationConfig> {
        let config: SimulationConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}
