use crate::env::PrecisionTables;
use crate::error::ConfigError;

/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of independent matches a session plays.
    pub games: u32,
    /// Shot outcome probabilities per gender category.
    pub precision: PrecisionTables,
}

impl SimulationConfig {
    // ===== fixed match structure =====
    /// Archers per team.
    pub const ROSTER_SIZE: usize = 5;
    /// Rounds per match.
    pub const ROUNDS_PER_MATCH: u32 = 10;
    /// Zero-based round counter from which streak bonuses are granted.
    pub const STREAK_BONUS_FROM_ROUND: u32 = 2;
    /// Consecutive bonus-shot wins that earn an extra shot.
    pub const STREAK_BONUS_LENGTH: u32 = 3;

    // ===== archer parameters =====
    pub const STAMINA_MIN: i32 = 25;
    pub const STAMINA_MAX: i32 = 45;
    pub const STAMINA_PER_SHOT: i32 = 5;
    pub const FATIGUE_MIN: i32 = 1;
    pub const FATIGUE_MAX: i32 = 2;
    pub const STARTING_EXPERIENCE: u32 = 10;
    pub const EXPERIENCE_PER_ROUND_WIN: u32 = 3;
    pub const LUCK_MIN: f64 = 1.0;
    pub const LUCK_MAX: f64 = 3.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GAMES: u32 = 20_000;

    pub fn new() -> Self {
        Self {
            games: Self::DEFAULT_GAMES,
            precision: PrecisionTables::default(),
        }
    }

    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_precision(mut self, precision: PrecisionTables) -> Self {
        self.precision = precision;
        self
    }

    /// Checks the game count is positive and every precision table sums to one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::ZeroGames);
        }
        self.precision.validate()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
