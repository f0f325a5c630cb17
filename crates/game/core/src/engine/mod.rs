//! Match state machine.
//!
//! A [`Match`] owns two teams and advances them through exactly ten rounds.
//! Each round runs the same fixed pipeline:
//!
//! 1. every archer shoots until stamina runs out
//! 2. each team's luckiest archer gets a bonus shot
//! 3. from the third round on, archers on a three-round bonus streak shoot again
//! 4. the two top scorers duel for the round win (re-shooting on ties)
//! 5. round totals are banked and the higher team takes the round
//! 6. the round index advances and round scores reset
//!
//! Winner queries read the current accumulators, so they are valid mid-match too.

mod round;
mod tiebreak;

pub use round::RoundSummary;
pub use tiebreak::{DuelSide, TiebreakOutcome, resolve_tiebreak};

use crate::config::SimulationConfig;
use crate::env::{PrecisionOracle, RandomSource};
use crate::error::MatchError;
use crate::state::{Archer, Gender, Team, TeamId, TeamSlot};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchPhase {
    InProgress,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match {
    teams: [Team; 2],
    /// One-based index of the next round to play.
    round: u32,
    phase: MatchPhase,
    winner_gender: Option<Gender>,
}

impl Match {
    pub fn new(first: Team, second: Team) -> Self {
        Self {
            teams: [first, second],
            round: 1,
            phase: MatchPhase::InProgress,
            winner_gender: None,
        }
    }

    /// Fresh rosters: archers 1..=5 for the first team, 6..=10 for the second.
    pub fn with_fresh_teams<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let first = Team::new(TeamId::FIRST, 1, rng);
        let second = Team::new(
            TeamId::SECOND,
            1 + SimulationConfig::ROSTER_SIZE as u32,
            rng,
        );
        Self::new(first, second)
    }

    /// Play every remaining round.
    pub fn play<T, R>(&mut self, tables: &T, rng: &mut R) -> Result<(), MatchError>
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        while self.phase == MatchPhase::InProgress {
            self.play_round(tables, rng)?;
        }
        Ok(())
    }

    /// Advance the match by one round.
    ///
    /// # Errors
    ///
    /// [`MatchError::AlreadyComplete`] once all ten rounds have been played.
    pub fn play_round<T, R>(&mut self, tables: &T, rng: &mut R) -> Result<RoundSummary, MatchError>
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        if self.phase == MatchPhase::Complete {
            return Err(MatchError::AlreadyComplete {
                rounds: SimulationConfig::ROUNDS_PER_MATCH,
            });
        }
        let round = self.round;

        let shots = self.teams.each_mut().map(|team| team.execute_round(tables, rng));

        let bonus_shots = self
            .teams
            .each_mut()
            .map(|team| team.grant_bonus_shot_to_luckiest(round, tables, rng));

        let mut streak_shots = Vec::new();
        if round > SimulationConfig::STREAK_BONUS_FROM_ROUND {
            for team in &mut self.teams {
                streak_shots.extend(team.grant_streak_bonus(tables, rng));
            }
        }

        let [first, second] = &mut self.teams;
        let duel = resolve_tiebreak(
            first.highest_round_scorer_mut(),
            second.highest_round_scorer_mut(),
            tables,
            rng,
        )?;

        let totals = self.teams.each_ref().map(Team::round_score_total);
        for (team, total) in self.teams.iter_mut().zip(totals) {
            team.add_score(total);
        }
        let team_winner = match totals[0].cmp(&totals[1]) {
            std::cmp::Ordering::Greater => Some(TeamSlot::First),
            std::cmp::Ordering::Less => Some(TeamSlot::Second),
            std::cmp::Ordering::Equal => None,
        }
        .map(|slot| {
            let team = &mut self.teams[slot.index()];
            team.record_round_win();
            team.id()
        });

        self.round += 1;
        self.teams.iter_mut().for_each(Team::reset_round_scores);

        tracing::trace!(
            round,
            winner = %duel.winner,
            reshoots = duel.reshoots,
            first_total = totals[0],
            second_total = totals[1],
            team_winner = ?team_winner,
            "round complete"
        );

        if round >= SimulationConfig::ROUNDS_PER_MATCH {
            self.phase = MatchPhase::Complete;
            self.winner_gender = self.match_winner_archer().map(Archer::gender);
        }

        Ok(RoundSummary {
            round,
            shots,
            bonus_shots,
            streak_shots,
            duel,
            totals,
            team_winner,
        })
    }

    /// Archer with the most round wins. A tie goes to the second team.
    pub fn match_winner_archer(&self) -> Option<&Archer> {
        second_unless_first_greater(
            self.teams[0].most_rounds_won(),
            self.teams[1].most_rounds_won(),
            Archer::rounds_won,
        )
    }

    /// Gender of the match winner, recorded when the last round completes.
    pub fn winner_gender(&self) -> Option<Gender> {
        self.winner_gender
    }

    /// Most experienced archer. A tie goes to the second team.
    pub fn most_experienced_overall(&self) -> Option<&Archer> {
        second_unless_first_greater(
            self.teams[0].most_experienced(),
            self.teams[1].most_experienced(),
            Archer::experience,
        )
    }

    /// Archer with the most bonus shots received. A tie goes to the first team.
    pub fn luckiest_overall(&self) -> Option<&Archer> {
        let first = self.teams[0].luckiest_by_counter();
        let second = self.teams[1].luckiest_by_counter();
        match (first, second) {
            (Some(a), Some(b)) if a.luck_counter() >= b.luck_counter() => Some(a),
            (Some(_), Some(b)) => Some(b),
            (a, b) => a.or(b),
        }
    }

    pub fn team_score(&self, slot: TeamSlot) -> u32 {
        self.teams[slot.index()].score()
    }

    pub fn team(&self, slot: TeamSlot) -> &Team {
        &self.teams[slot.index()]
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    /// One-based index of the next round to play (11 once complete).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number of rounds already played.
    pub fn rounds_played(&self) -> u32 {
        self.round - 1
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == MatchPhase::Complete
    }

    /// First team's archers, then the second team's.
    pub fn all_archers(&self) -> impl Iterator<Item = &Archer> {
        self.teams.iter().flat_map(Team::archers)
    }
}

fn second_unless_first_greater<'a>(
    first: Option<&'a Archer>,
    second: Option<&'a Archer>,
    key: impl Fn(&Archer) -> u32,
) -> Option<&'a Archer> {
    match (first, second) {
        (Some(a), Some(b)) if key(a) > key(b) => Some(a),
        (Some(_), Some(b)) => Some(b),
        (a, b) => a.or(b),
    }
}
