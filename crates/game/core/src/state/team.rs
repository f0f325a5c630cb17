//! Fixed five-archer rosters and their aggregate queries.

use std::cmp::Ordering;

use arrayvec::ArrayVec;

use crate::config::SimulationConfig;
use crate::env::{PrecisionOracle, RandomSource};
use crate::error::MatchError;

use super::archer::Archer;
use super::common::{ArcherId, Shot, TeamId};

const ROSTER_SIZE: usize = SimulationConfig::ROSTER_SIZE;

/// Roster storage. Capacity equals the fixed roster size.
pub type Roster = ArrayVec<Archer, ROSTER_SIZE>;

/// An extra shot granted outside the stamina loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusShot {
    pub archer: ArcherId,
    pub shot: Shot,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Team {
    id: TeamId,
    archers: Roster,
    /// Round totals plus bonus shots, accumulated across the match.
    score: u32,
    rounds_won: u32,
}

impl Team {
    /// Build a team of freshly drawn archers with consecutive ids starting at `first_archer`.
    pub fn new<R: RandomSource + ?Sized>(id: TeamId, first_archer: u32, rng: &mut R) -> Self {
        let archers = (0..ROSTER_SIZE as u32)
            .map(|offset| Archer::new(ArcherId(first_archer + offset), rng))
            .collect();

        Self {
            id,
            archers,
            score: 0,
            rounds_won: 0,
        }
    }

    /// Build a team from prepared archers.
    ///
    /// The roster must hold exactly five archers with distinct ids.
    pub fn from_archers(
        id: TeamId,
        archers: impl IntoIterator<Item = Archer>,
    ) -> Result<Self, MatchError> {
        let archers: Vec<Archer> = archers.into_iter().collect();
        if archers.len() != ROSTER_SIZE {
            return Err(MatchError::RosterSize {
                team: id.0,
                expected: ROSTER_SIZE,
                actual: archers.len(),
            });
        }
        for (i, archer) in archers.iter().enumerate() {
            if archers[..i].iter().any(|other| other.id() == archer.id()) {
                return Err(MatchError::DuplicateArcher(archer.id()));
            }
        }

        Ok(Self {
            id,
            archers: archers.into_iter().collect(),
            score: 0,
            rounds_won: 0,
        })
    }

    /// Every archer shoots a full stamina round. Returns total shots taken.
    pub fn execute_round<T, R>(&mut self, tables: &T, rng: &mut R) -> u32
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.archers
            .iter_mut()
            .map(|archer| archer.execute_round(tables, rng))
            .sum()
    }

    /// Archer with the highest current luck value; ties go to roster order.
    pub fn luckiest_by_luck_value(&self) -> Option<&Archer> {
        self.luckiest_index().map(|i| &self.archers[i])
    }

    fn luckiest_index(&self) -> Option<usize> {
        first_max_by(&self.archers, |a, b| {
            a.luck_value()
                .partial_cmp(&b.luck_value())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// One extra shot for the luckiest archer, credited to the team score.
    ///
    /// Records the bonus win for the streak and bumps the archer's luck counter.
    pub fn grant_bonus_shot_to_luckiest<T, R>(
        &mut self,
        round: u32,
        tables: &T,
        rng: &mut R,
    ) -> Option<BonusShot>
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        let index = self.luckiest_index()?;

        let archer = &mut self.archers[index];
        let shot = archer.shoot(tables, rng);
        self.score += shot.score();
        archer.record_bonus_shot_win(round);
        archer.increment_luck_counter();

        Some(BonusShot {
            archer: archer.id(),
            shot,
        })
    }

    /// An extra shot for every archer whose bonus streak is exactly three.
    ///
    /// The streak is not consumed, so an archer pinned at three keeps
    /// earning this shot every round until the streak changes.
    pub fn grant_streak_bonus<T, R>(&mut self, tables: &T, rng: &mut R) -> Vec<BonusShot>
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut awarded = Vec::new();
        for archer in &self.archers {
            if archer.bonus_shots_won() == SimulationConfig::STREAK_BONUS_LENGTH {
                let shot = archer.shoot(tables, rng);
                self.score += shot.score();
                awarded.push(BonusShot {
                    archer: archer.id(),
                    shot,
                });
            }
        }
        awarded
    }

    pub fn highest_round_scorer(&self) -> Option<&Archer> {
        self.highest_round_scorer_index().map(|i| &self.archers[i])
    }

    pub fn highest_round_scorer_mut(&mut self) -> Option<&mut Archer> {
        let index = self.highest_round_scorer_index()?;
        Some(&mut self.archers[index])
    }

    fn highest_round_scorer_index(&self) -> Option<usize> {
        first_max_by(&self.archers, |a, b| a.round_score().cmp(&b.round_score()))
    }

    pub fn most_rounds_won(&self) -> Option<&Archer> {
        first_max_by(&self.archers, |a, b| a.rounds_won().cmp(&b.rounds_won()))
            .map(|i| &self.archers[i])
    }

    pub fn most_experienced(&self) -> Option<&Archer> {
        first_max_by(&self.archers, |a, b| a.experience().cmp(&b.experience()))
            .map(|i| &self.archers[i])
    }

    /// Archer who received the most bonus shots.
    pub fn luckiest_by_counter(&self) -> Option<&Archer> {
        first_max_by(&self.archers, |a, b| a.luck_counter().cmp(&b.luck_counter()))
            .map(|i| &self.archers[i])
    }

    pub fn round_score_total(&self) -> u32 {
        self.archers.iter().map(Archer::round_score).sum()
    }

    pub fn reset_round_scores(&mut self) {
        self.archers.iter_mut().for_each(Archer::reset_round_score);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn record_round_win(&mut self) {
        self.rounds_won += 1;
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn archers(&self) -> &[Archer] {
        &self.archers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }
}

/// Index of the maximum element, keeping the first one on ties.
///
/// `None` for an empty slice.
pub fn first_max_by<F>(archers: &[Archer], mut compare: F) -> Option<usize>
where
    F: FnMut(&Archer, &Archer) -> Ordering,
{
    let mut best: Option<usize> = None;
    for (i, archer) in archers.iter().enumerate() {
        match best {
            Some(b) if compare(archer, &archers[b]) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, PrecisionTables, ScriptedRng};
    use crate::state::{ArcherProfile, Gender};

    fn roster(lucks: [f64; 5]) -> Team {
        let archers = lucks.iter().enumerate().map(|(i, &luck)| {
            Archer::from_profile(
                ArcherProfile::new(ArcherId(i as u32 + 1), Gender::Female).with_luck(luck),
            )
        });
        Team::from_archers(TeamId::FIRST, archers).unwrap()
    }

    #[test]
    fn new_team_has_five_consecutive_ids() {
        let mut rng = PcgRng::seeded(5);
        let team = Team::new(TeamId::SECOND, 6, &mut rng);
        let ids: Vec<u32> = team.archers().iter().map(|a| a.id().0).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
        assert_eq!(team.score(), 0);
        assert_eq!(team.rounds_won(), 0);
    }

    #[test]
    fn roster_size_is_enforced() {
        let four = (1..=4).map(|i| Archer::from_profile(ArcherProfile::new(ArcherId(i), Gender::Male)));
        assert_eq!(
            Team::from_archers(TeamId::FIRST, four),
            Err(MatchError::RosterSize {
                team: 1,
                expected: 5,
                actual: 4
            })
        );

        let dup = [1, 2, 3, 2, 5]
            .map(|i| Archer::from_profile(ArcherProfile::new(ArcherId(i), Gender::Male)));
        assert_eq!(
            Team::from_archers(TeamId::FIRST, dup),
            Err(MatchError::DuplicateArcher(ArcherId(2)))
        );
    }

    #[test]
    fn empty_slice_has_no_maximum() {
        assert_eq!(first_max_by(&[], |a, b| a.experience().cmp(&b.experience())), None);
    }

    #[test]
    fn ties_resolve_to_roster_order() {
        let team = roster([1.5, 2.5, 2.5, 1.0, 2.0]);
        assert_eq!(team.luckiest_by_luck_value().map(Archer::id), Some(ArcherId(2)));
        // Everyone is level on every counter: first archer wins.
        assert_eq!(team.most_rounds_won().map(Archer::id), Some(ArcherId(1)));
        assert_eq!(team.most_experienced().map(Archer::id), Some(ArcherId(1)));
        assert_eq!(team.luckiest_by_counter().map(Archer::id), Some(ArcherId(1)));
        assert_eq!(team.highest_round_scorer().map(Archer::id), Some(ArcherId(1)));
    }

    #[test]
    fn bonus_shot_goes_to_luckiest_and_counts_for_team() {
        let tables = PrecisionTables::default();
        let mut team = roster([1.0, 1.1, 2.9, 1.2, 1.3]);
        // Female central threshold is 0.30.
        let mut rng = ScriptedRng::new([0.1]);

        let award = team.grant_bonus_shot_to_luckiest(1, &tables, &mut rng);
        assert_eq!(
            award,
            Some(BonusShot {
                archer: ArcherId(3),
                shot: Shot::Central
            })
        );
        assert_eq!(team.score(), 10);

        let lucky = &team.archers()[2];
        assert_eq!(lucky.luck_counter(), 1);
        assert_eq!(lucky.bonus_shots_won(), 1);
        assert_eq!(lucky.last_bonus_round(), Some(1));
        // Bonus shots bypass the archer's own score.
        assert_eq!(lucky.total_score(), 0);
        assert_eq!(team.round_score_total(), 0);
    }

    #[test]
    fn bonus_shot_follows_luckiest_query_on_ties() {
        let tables = PrecisionTables::default();
        let mut team = roster([1.0, 2.5, 1.2, 2.5, 1.3]);
        let expected = team.luckiest_by_luck_value().map(Archer::id);
        assert_eq!(expected, Some(ArcherId(2)));

        let mut rng = ScriptedRng::new([0.5]);
        let award = team.grant_bonus_shot_to_luckiest(1, &tables, &mut rng);
        assert_eq!(award.map(|b| b.archer), expected);
    }

    #[test]
    fn streak_bonus_requires_exactly_three() {
        let tables = PrecisionTables::default();
        let mut team = roster([1.0, 1.1, 2.9, 1.2, 1.3]);
        let mut rng = ScriptedRng::new([0.1]);

        for round in 1..=2 {
            team.grant_bonus_shot_to_luckiest(round, &tables, &mut rng);
        }
        assert!(team.grant_streak_bonus(&tables, &mut rng).is_empty());

        team.grant_bonus_shot_to_luckiest(3, &tables, &mut rng);
        let before = team.score();
        let awarded = team.grant_streak_bonus(&tables, &mut rng);
        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].archer, ArcherId(3));
        assert_eq!(team.score(), before + 10);

        // Pinned at three without a new bonus win: the extra shot repeats.
        let again = team.grant_streak_bonus(&tables, &mut rng);
        assert_eq!(again.len(), 1);

        // A fourth consecutive win moves the streak past three.
        team.grant_bonus_shot_to_luckiest(4, &tables, &mut rng);
        assert_eq!(team.archers()[2].bonus_shots_won(), 4);
        assert!(team.grant_streak_bonus(&tables, &mut rng).is_empty());
    }

    #[test]
    fn round_totals_and_reset() {
        let tables = PrecisionTables::default();
        let mut rng = ScriptedRng::new([0.0]);
        let mut team = roster([1.0; 5]);
        // Default profile stamina is 45: nine central shots each.
        let shots = team.execute_round(&tables, &mut rng);
        assert_eq!(shots, 45);
        assert_eq!(team.round_score_total(), 450);

        team.add_score(team.round_score_total());
        team.reset_round_scores();
        assert_eq!(team.round_score_total(), 0);
        assert_eq!(team.score(), 450);
        assert!(team.archers().iter().all(|a| a.total_score() == 90));
    }

    #[test]
    fn highest_scorer_is_mutable() {
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(12);
        let mut team = Team::new(TeamId::FIRST, 1, &mut rng);
        team.execute_round(&tables, &mut rng);
        let best = team.highest_round_scorer().map(|a| (a.id(), a.round_score()));
        let scorer = team.highest_round_scorer_mut().unwrap();
        assert_eq!(Some((scorer.id(), scorer.round_score())), best);
        scorer.record_round_win();
        assert_eq!(team.most_rounds_won().map(Archer::id), best.map(|b| b.0));
    }
}
