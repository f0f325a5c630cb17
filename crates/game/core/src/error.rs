//! Common error infrastructure for archery-core.
//!
//! Domain-specific errors live next to the code that raises them:
//! [`ConfigError`] for precision tables and session parameters, and
//! [`MatchError`] for the round state machine. [`SimulationError`] is the
//! umbrella type returned by [`crate::Session::run`].
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Silent Defaults**: Contract violations fail fast instead of substituting values

use crate::state::{ArcherId, Gender};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: precision table that does not sum to one, zero game count
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: tie-break requested without a candidate archer
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all archery-core errors.
///
/// Provides a uniform interface for classification across the crate.
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Configuration rejected at construction time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("precision table for {gender} sums to {sum}, expected 1.0")]
    PrecisionSum { gender: Gender, sum: f64 },

    #[error("precision table for {gender} has invalid probability {value}")]
    InvalidProbability { gender: Gender, value: f64 },

    #[error("number of games must be positive")]
    ZeroGames,
}

impl SimError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PrecisionSum { .. } => "CONFIG_PRECISION_SUM",
            Self::InvalidProbability { .. } => "CONFIG_INVALID_PROBABILITY",
            Self::ZeroGames => "CONFIG_ZERO_GAMES",
        }
    }
}

/// Which side of a tie-break was missing its candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TiebreakSide {
    First,
    Second,
}

/// Errors raised by the match state machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A tie-break was requested with an absent archer.
    #[error("tie-break candidate on the {side} side is missing")]
    MissingCandidate { side: TiebreakSide },

    #[error("match already completed all {rounds} rounds")]
    AlreadyComplete { rounds: u32 },

    #[error("team {team} must field exactly {expected} archers, got {actual}")]
    RosterSize {
        team: u32,
        expected: usize,
        actual: usize,
    },

    #[error("archer {0} appears more than once in the roster")]
    DuplicateArcher(ArcherId),
}

impl SimError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingCandidate { .. } | Self::AlreadyComplete { .. } => {
                ErrorSeverity::Internal
            }
            Self::RosterSize { .. } | Self::DuplicateArcher(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCandidate { .. } => "MATCH_MISSING_CANDIDATE",
            Self::AlreadyComplete { .. } => "MATCH_ALREADY_COMPLETE",
            Self::RosterSize { .. } => "MATCH_ROSTER_SIZE",
            Self::DuplicateArcher(_) => "MATCH_DUPLICATE_ARCHER",
        }
    }
}

/// Errors surfaced while running a whole session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("match {index} failed: {source}")]
    Match {
        index: usize,
        #[source]
        source: MatchError,
    },
}

impl SimError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(e) => e.severity(),
            Self::Match { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Match { source, .. } => source.error_code(),
        }
    }
}
