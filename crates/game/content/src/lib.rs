//! Data-driven simulation settings.
//!
//! This crate reads [`SimulationConfig`](archery_core::SimulationConfig)
//! values from TOML files so front-ends can tune the game count and the
//! per-gender precision tables without recompiling.
//!
//! Loaders return configs that have already passed
//! [`SimulationConfig::validate`](archery_core::SimulationConfig::validate).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult};
