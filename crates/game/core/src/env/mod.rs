//! Read-only inputs to the simulation.
//!
//! The random stream and the precision tables are the only things the engine
//! consults besides its own state. Both are handed in by the caller.
mod rng;
mod tables;

pub use rng::{PcgRng, RandomSource, ScriptedRng, mix_seed};
pub use tables::{PRECISION_SUM_TOLERANCE, PrecisionOracle, PrecisionTable, PrecisionTables};
