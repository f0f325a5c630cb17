use crate::state::{BonusShot, TeamId};

use super::tiebreak::TiebreakOutcome;

/// Everything that happened in one completed round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSummary {
    /// One-based round index.
    pub round: u32,
    /// Shots taken in the stamina loop, per team.
    pub shots: [u32; 2],
    /// Luckiest-archer bonus shot, per team.
    pub bonus_shots: [Option<BonusShot>; 2],
    /// Streak bonus shots, both teams combined.
    pub streak_shots: Vec<BonusShot>,
    /// Round archer winner.
    pub duel: TiebreakOutcome,
    /// Per-team stamina-loop totals added to the team scores.
    pub totals: [u32; 2],
    /// Team with the higher total, `None` on a level round.
    pub team_winner: Option<TeamId>,
}
