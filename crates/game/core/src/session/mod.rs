//! Multi-match sessions and cross-match statistics.
//!
//! A [`Session`] plays every match up front and is read-only afterwards.
//! Aggregates are recomputed from the stored matches on every call, so
//! repeated queries return identical results.

mod report;

pub use report::{
    ArcherEntry, ArcherScoreSeries, GenderEntry, GenderTally, SimulationReport, TeamStanding,
};

use crate::config::SimulationConfig;
use crate::engine::Match;
use crate::env::{PrecisionTables, RandomSource};
use crate::error::SimulationError;
use crate::state::{Archer, Gender, TeamId, TeamSlot};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Session {
    matches: Vec<Match>,
}

impl Session {
    /// Validate `config` and play `config.games` matches.
    pub fn from_config<R: RandomSource + ?Sized>(
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::run(config.games, &config.precision, rng)
    }

    /// Play `games` independent matches with fresh rosters.
    ///
    /// Zero games is allowed and yields an empty session.
    pub fn run<R: RandomSource + ?Sized>(
        games: u32,
        tables: &PrecisionTables,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        tables.validate()?;
        tracing::info!(games, "starting simulation");

        let mut matches = Vec::new();
        for index in 1..=games as usize {
            let mut game = Match::with_fresh_teams(rng);
            game.play(tables, rng)
                .map_err(|source| SimulationError::Match { index, source })?;

            tracing::debug!(
                index,
                winner = ?game.match_winner_archer().map(Archer::id),
                gender = ?game.winner_gender(),
                first_score = game.team_score(TeamSlot::First),
                second_score = game.team_score(TeamSlot::Second),
                "match complete"
            );
            matches.push(game);
        }

        let session = Self { matches };
        tracing::info!(
            games = session.matches.len(),
            leader = %session.gender_win_rate_label(),
            "simulation complete"
        );
        Ok(session)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Match wins per gender, counted afresh on every call.
    pub fn gender_win_counts(&self) -> GenderTally {
        let mut tally = GenderTally::default();
        for gender in self.matches.iter().filter_map(Match::winner_gender) {
            tally.record(gender);
        }
        tally
    }

    /// Gender with more match wins; a tie (including no matches) goes to female.
    pub fn gender_win_rate_label(&self) -> Gender {
        self.gender_win_counts().leader()
    }

    /// Team with the higher summed score; a tie (including no matches) goes to team 1.
    pub fn winning_team(&self) -> TeamStanding {
        let [first, second] = TeamSlot::ALL.map(|slot| {
            self.matches
                .iter()
                .map(|game| u64::from(game.team_score(slot)))
                .sum::<u64>()
        });

        if second > first {
            TeamStanding {
                team: TeamId::SECOND,
                points: second,
            }
        } else {
            TeamStanding {
                team: TeamId::FIRST,
                points: first,
            }
        }
    }

    /// Luckiest archer of each match, ranked by bonus shots received.
    pub fn lucky_archers_report(&self) -> Vec<ArcherEntry> {
        self.per_match(|game| {
            game.luckiest_overall()
                .map(|archer| (archer, archer.luck_counter()))
        })
    }

    /// Most experienced archer of each match.
    pub fn experienced_archers_report(&self) -> Vec<ArcherEntry> {
        self.per_match(|game| {
            game.most_experienced_overall()
                .map(|archer| (archer, archer.experience()))
        })
    }

    pub fn gender_by_match_report(&self) -> Vec<GenderEntry> {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(i, game)| {
                game.winner_gender().map(|gender| GenderEntry {
                    match_index: i + 1,
                    gender,
                })
            })
            .collect()
    }

    /// Every archer of every match, in match order, first team before second.
    pub fn all_archers(&self) -> Vec<&Archer> {
        self.matches.iter().flat_map(Match::all_archers).collect()
    }

    /// Bundle every aggregate into one value for the presentation layer.
    pub fn report(&self) -> SimulationReport {
        let gender_wins = self.gender_win_counts();
        let archer_scores = self
            .matches
            .iter()
            .enumerate()
            .flat_map(|(i, game)| {
                game.teams().iter().flat_map(move |team| {
                    team.archers().iter().map(move |archer| ArcherScoreSeries {
                        match_index: i + 1,
                        team: team.id(),
                        archer: archer.id(),
                        gender: archer.gender(),
                        total_score: archer.total_score(),
                        history: archer.score_history().to_vec(),
                    })
                })
            })
            .collect();

        SimulationReport {
            games: self.matches.len(),
            winning_team: self.winning_team(),
            gender_wins,
            gender_win_rate: gender_wins.leader(),
            lucky_archers: self.lucky_archers_report(),
            experienced_archers: self.experienced_archers_report(),
            gender_by_match: self.gender_by_match_report(),
            archer_scores,
        }
    }

    fn per_match<F>(&self, pick: F) -> Vec<ArcherEntry>
    where
        F: Fn(&Match) -> Option<(&Archer, u32)>,
    {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(i, game)| {
                pick(game).map(|(archer, value)| ArcherEntry {
                    match_index: i + 1,
                    archer: archer.id(),
                    value,
                })
            })
            .collect()
    }
}
