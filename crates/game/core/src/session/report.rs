//! Plain data handed to the presentation layer.
//!
//! Nothing here is formatted for display; number grouping, labels, and
//! layout are the front-end's concern.

use crate::state::{ArcherId, Gender, TeamId};

/// Archer singled out in one match, with the statistic that ranked them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcherEntry {
    /// One-based match index.
    pub match_index: usize,
    pub archer: ArcherId,
    pub value: u32,
}

/// Winning gender of one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenderEntry {
    /// One-based match index.
    pub match_index: usize,
    pub gender: Gender,
}

/// Match wins per gender category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenderTally {
    pub male: u32,
    pub female: u32,
}

impl GenderTally {
    pub fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    pub fn wins(&self, gender: Gender) -> u32 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    /// Category with more wins; a tie goes to [`Gender::Female`].
    pub fn leader(&self) -> Gender {
        if self.male > self.female {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

/// Team with the higher score summed over every match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamStanding {
    pub team: TeamId,
    pub points: u64,
}

/// Per-archer score progression for score-over-time charts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcherScoreSeries {
    /// One-based match index.
    pub match_index: usize,
    pub team: TeamId,
    pub archer: ArcherId,
    pub gender: Gender,
    pub total_score: u32,
    /// Total score after each round.
    pub history: Vec<u32>,
}

/// Everything the presentation layer needs from a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    pub games: usize,
    pub winning_team: TeamStanding,
    pub gender_wins: GenderTally,
    pub gender_win_rate: Gender,
    pub lucky_archers: Vec<ArcherEntry>,
    pub experienced_archers: Vec<ArcherEntry>,
    pub gender_by_match: Vec<GenderEntry>,
    pub archer_scores: Vec<ArcherScoreSeries>,
}
