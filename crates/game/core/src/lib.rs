//! Archery match simulation engine.
//!
//! `archery-core` defines the shot model, the per-archer stamina and luck
//! state machine, and the round/match scoring protocol. A [`Session`] plays
//! many independent [`Match`]es and derives cross-match statistics from them.
//!
//! Randomness is injected: every operation that draws takes a
//! [`RandomSource`] handle, so a seeded [`PcgRng`] replays a whole session.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod session;
pub mod state;

pub use config::SimulationConfig;
pub use engine::{DuelSide, Match, MatchPhase, RoundSummary, TiebreakOutcome, resolve_tiebreak};
pub use env::{PcgRng, PrecisionOracle, PrecisionTable, PrecisionTables, RandomSource, ScriptedRng};
pub use error::{ConfigError, ErrorSeverity, MatchError, SimError, SimulationError, TiebreakSide};
pub use session::{
    ArcherEntry, ArcherScoreSeries, GenderEntry, GenderTally, Session, SimulationReport,
    TeamStanding,
};
pub use state::{Archer, ArcherId, ArcherProfile, BonusShot, Gender, Shot, Team, TeamId, TeamSlot};
