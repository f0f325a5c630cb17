//! Per-archer state and the shot model.
//!
//! An archer is created fresh for every match and only mutated through the
//! operations below. Stamina bounds how many shots a round allows, luck picks
//! who receives the round's bonus shot, and experience tracks round wins.

use crate::config::SimulationConfig;
use crate::env::{PrecisionOracle, RandomSource};

use super::common::{ArcherId, Gender, Shot};

/// Deterministic starting attributes for an archer.
///
/// [`Archer::new`] draws these from the random stream; fixtures and replays
/// can supply them directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcherProfile {
    pub id: ArcherId,
    pub gender: Gender,
    pub stamina: i32,
    pub luck: f64,
}

impl ArcherProfile {
    pub fn new(id: ArcherId, gender: Gender) -> Self {
        Self {
            id,
            gender,
            stamina: SimulationConfig::STAMINA_MAX,
            luck: SimulationConfig::LUCK_MIN,
        }
    }

    pub fn with_stamina(mut self, stamina: i32) -> Self {
        self.stamina = stamina;
        self
    }

    pub fn with_luck(mut self, luck: f64) -> Self {
        self.luck = luck;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Archer {
    id: ArcherId,
    gender: Gender,

    /// Stamina left for the current round.
    stamina_budget: i32,
    /// Stamina restored at the end of each round, minus fatigue.
    stamina_baseline: i32,

    experience: u32,
    /// Re-rolled every round; only ranks the round's luckiest archer.
    luck_value: f64,
    /// Number of bonus shots received.
    luck_counter: u32,

    round_score: u32,
    total_score: u32,
    rounds_won: u32,

    /// Consecutive-round bonus shot wins.
    bonus_shots_won: u32,
    last_bonus_round: Option<u32>,

    /// `total_score` after every executed round.
    score_history: Vec<u32>,
}

impl Archer {
    /// Create an archer with freshly drawn stamina, luck, and gender.
    pub fn new<R: RandomSource + ?Sized>(id: ArcherId, rng: &mut R) -> Self {
        let stamina = rng.range(SimulationConfig::STAMINA_MIN, SimulationConfig::STAMINA_MAX);
        let luck = roll_luck(rng);
        let gender = Gender::from_index(rng.range(0, 1));

        Self::from_profile(ArcherProfile {
            id,
            gender,
            stamina,
            luck,
        })
    }

    /// Create an archer from fixed attributes.
    ///
    /// Stamina is clamped into `[0, 45]` and luck into `[1, 3)`.
    pub fn from_profile(profile: ArcherProfile) -> Self {
        let stamina = profile.stamina.clamp(0, SimulationConfig::STAMINA_MAX);
        let luck = if profile.luck >= SimulationConfig::LUCK_MAX {
            f64::from_bits(SimulationConfig::LUCK_MAX.to_bits() - 1)
        } else {
            profile.luck.max(SimulationConfig::LUCK_MIN)
        };

        Self {
            id: profile.id,
            gender: profile.gender,
            stamina_budget: stamina,
            stamina_baseline: stamina,
            experience: SimulationConfig::STARTING_EXPERIENCE,
            luck_value: luck,
            luck_counter: 0,
            round_score: 0,
            total_score: 0,
            rounds_won: 0,
            bonus_shots_won: 0,
            last_bonus_round: None,
            score_history: Vec::with_capacity(SimulationConfig::ROUNDS_PER_MATCH as usize),
        }
    }

    /// Draw one shot. Consumes a single unit draw and leaves the archer untouched.
    pub fn shoot<T, R>(&self, tables: &T, rng: &mut R) -> Shot
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        tables.precision(self.gender).resolve(rng.next_unit())
    }

    /// Shoot until stamina runs out, then recover stamina and re-roll luck.
    ///
    /// Returns the number of shots taken. A baseline at or below zero means
    /// the archer takes no shots at all this round.
    pub fn execute_round<T, R>(&mut self, tables: &T, rng: &mut R) -> u32
    where
        T: PrecisionOracle + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut shots = 0;
        while self.stamina_budget > 0 {
            let score = self.shoot(tables, rng).score();
            self.round_score += score;
            self.total_score += score;
            self.stamina_budget -= SimulationConfig::STAMINA_PER_SHOT;
            shots += 1;
        }

        let fatigue = rng.range(SimulationConfig::FATIGUE_MIN, SimulationConfig::FATIGUE_MAX);
        self.stamina_baseline = self.stamina_baseline.saturating_sub(fatigue);
        self.stamina_budget = self.stamina_baseline;
        self.luck_value = roll_luck(rng);
        self.score_history.push(self.total_score);

        shots
    }

    /// Track a bonus shot win in `round`, extending the streak only when the
    /// previous win was in the immediately preceding round.
    pub fn record_bonus_shot_win(&mut self, round: u32) {
        self.bonus_shots_won = match self.last_bonus_round {
            Some(last) if last + 1 == round => self.bonus_shots_won + 1,
            _ => 1,
        };
        self.last_bonus_round = Some(round);
    }

    pub fn increment_luck_counter(&mut self) {
        self.luck_counter += 1;
    }

    pub fn gain_experience(&mut self) {
        self.experience += SimulationConfig::EXPERIENCE_PER_ROUND_WIN;
    }

    pub fn record_round_win(&mut self) {
        self.rounds_won += 1;
    }

    /// Spend one point of the current round's stamina.
    ///
    /// Only used by the experience-driven variant; the main round loop never calls it.
    pub fn decrement_stamina_by_experience(&mut self) {
        self.stamina_budget -= 1;
    }

    pub fn reset_round_score(&mut self) {
        self.round_score = 0;
    }

    pub fn id(&self) -> ArcherId {
        self.id
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn stamina_budget(&self) -> i32 {
        self.stamina_budget
    }

    pub fn stamina_baseline(&self) -> i32 {
        self.stamina_baseline
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn luck_value(&self) -> f64 {
        self.luck_value
    }

    pub fn luck_counter(&self) -> u32 {
        self.luck_counter
    }

    pub fn round_score(&self) -> u32 {
        self.round_score
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    pub fn bonus_shots_won(&self) -> u32 {
        self.bonus_shots_won
    }

    pub fn last_bonus_round(&self) -> Option<u32> {
        self.last_bonus_round
    }

    pub fn score_history(&self) -> &[u32] {
        &self.score_history
    }
}

fn roll_luck<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    rng.range_unit(SimulationConfig::LUCK_MIN, SimulationConfig::LUCK_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, PrecisionTables, ScriptedRng};
    use strum::IntoEnumIterator;

    fn fixture(stamina: i32) -> Archer {
        Archer::from_profile(ArcherProfile::new(ArcherId(1), Gender::Male).with_stamina(stamina))
    }

    #[test]
    fn initialization_draws_within_bounds() {
        let mut rng = PcgRng::seeded(11);
        for id in 0..1_000 {
            let archer = Archer::new(ArcherId(id), &mut rng);
            assert!((25..=45).contains(&archer.stamina_baseline()));
            assert_eq!(archer.stamina_budget(), archer.stamina_baseline());
            assert!((1.0..3.0).contains(&archer.luck_value()));
            assert_eq!(archer.experience(), 10);
            assert_eq!(archer.last_bonus_round(), None);
            assert_eq!(archer.total_score(), 0);
        }
    }

    #[test]
    fn both_genders_are_drawn() {
        let mut rng = PcgRng::seeded(3);
        let males = (0..1_000)
            .filter(|&id| Archer::new(ArcherId(id), &mut rng).gender() == Gender::Male)
            .count();
        assert!((400..600).contains(&males), "males = {males}");
    }

    #[test]
    fn shot_frequencies_match_precision_table() {
        const DRAWS: usize = 200_000;
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(2024);

        for gender in Gender::iter() {
            let archer = Archer::from_profile(ArcherProfile::new(ArcherId(1), gender));
            let mut counts = [0usize; 4];
            for _ in 0..DRAWS {
                let shot = archer.shoot(&tables, &mut rng);
                let slot = Shot::iter().position(|s| s == shot).unwrap();
                counts[slot] += 1;
            }
            for (shot, count) in Shot::iter().zip(counts) {
                let expected = tables.precision(gender).probability(shot);
                let observed = count as f64 / DRAWS as f64;
                assert!(
                    (observed - expected).abs() < 0.01,
                    "{gender} {shot}: observed {observed}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn shoot_consumes_one_draw_without_side_effects() {
        let tables = PrecisionTables::default();
        let archer = fixture(30);
        let before = archer.clone();
        let mut rng = ScriptedRng::new([0.1]);
        assert_eq!(archer.shoot(&tables, &mut rng), Shot::Central);
        assert_eq!(rng.draws(), 1);
        assert_eq!(archer, before);
    }

    #[test]
    fn round_stops_once_stamina_is_spent() {
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(8);
        for stamina in [1, 4, 5, 6, 25, 33, 45] {
            let mut archer = fixture(stamina);
            let shots = archer.execute_round(&tables, &mut rng);
            // One shot per started block of five stamina.
            assert_eq!(shots as i32, (stamina + 4) / 5, "stamina {stamina}");
            assert!(archer.round_score() <= shots * 10);
            assert_eq!(archer.round_score(), archer.total_score());
        }
    }

    #[test]
    fn round_recovers_stamina_minus_fatigue() {
        let tables = PrecisionTables::default();
        // Six shots (all central), fatigue draw at 0.0 -> 1, luck draw.
        let mut rng = ScriptedRng::new([0.0]);
        let mut archer = fixture(30);
        let shots = archer.execute_round(&tables, &mut rng);
        assert_eq!(shots, 6);
        assert_eq!(archer.round_score(), 60);
        assert_eq!(archer.stamina_baseline(), 29);
        assert_eq!(archer.stamina_budget(), 29);
        assert_eq!(archer.luck_value(), 1.0);
        assert_eq!(archer.score_history(), &[60]);

        let mut rng = ScriptedRng::new([0.9]);
        let mut archer = fixture(30);
        archer.execute_round(&tables, &mut rng);
        assert_eq!(archer.stamina_baseline(), 28);
    }

    #[test]
    fn exhausted_archer_takes_no_shots() {
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(1);
        let mut archer = fixture(0);
        assert_eq!(archer.execute_round(&tables, &mut rng), 0);
        assert_eq!(archer.round_score(), 0);
        assert!(archer.stamina_baseline() < 0);
        assert_eq!(archer.execute_round(&tables, &mut rng), 0);
        assert_eq!(archer.score_history(), &[0, 0]);
    }

    #[test]
    fn luck_rerolled_each_round_stays_in_range() {
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(77);
        let mut archer = Archer::new(ArcherId(4), &mut rng);
        for _ in 0..SimulationConfig::ROUNDS_PER_MATCH {
            archer.execute_round(&tables, &mut rng);
            assert!((1.0..3.0).contains(&archer.luck_value()));
            archer.reset_round_score();
        }
        assert_eq!(archer.score_history().len(), 10);
        assert!(archer.score_history().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn bonus_streak_extends_and_resets() {
        let mut archer = fixture(30);
        archer.record_bonus_shot_win(1);
        assert_eq!(archer.bonus_shots_won(), 1);
        archer.record_bonus_shot_win(2);
        archer.record_bonus_shot_win(3);
        assert_eq!(archer.bonus_shots_won(), 3);
        archer.record_bonus_shot_win(5);
        assert_eq!(archer.bonus_shots_won(), 1);
        assert_eq!(archer.last_bonus_round(), Some(5));
        // Same round twice is not consecutive.
        archer.record_bonus_shot_win(5);
        assert_eq!(archer.bonus_shots_won(), 1);
    }

    #[test]
    fn first_bonus_win_starts_streak_at_any_round() {
        let mut archer = fixture(30);
        archer.record_bonus_shot_win(0);
        assert_eq!(archer.bonus_shots_won(), 1);
        archer.record_bonus_shot_win(1);
        assert_eq!(archer.bonus_shots_won(), 2);
    }

    #[test]
    fn counters_only_move_through_operations() {
        let mut archer = fixture(30);
        archer.gain_experience();
        archer.gain_experience();
        archer.record_round_win();
        archer.increment_luck_counter();
        archer.decrement_stamina_by_experience();
        assert_eq!(archer.experience(), 16);
        assert_eq!(archer.rounds_won(), 1);
        assert_eq!(archer.luck_counter(), 1);
        assert_eq!(archer.stamina_budget(), 29);
        assert_eq!(archer.stamina_baseline(), 30);
    }

    #[test]
    fn profile_luck_is_clamped() {
        let high = Archer::from_profile(ArcherProfile::new(ArcherId(1), Gender::Male).with_luck(9.0));
        assert!(high.luck_value() < 3.0);
        let low = Archer::from_profile(ArcherProfile::new(ArcherId(1), Gender::Male).with_luck(0.0));
        assert_eq!(low.luck_value(), 1.0);
    }

    #[test]
    fn profile_stamina_is_clamped() {
        let tables = PrecisionTables::default();
        let mut rng = PcgRng::seeded(4);

        let mut high = fixture(i32::MAX);
        assert_eq!(high.stamina_baseline(), 45);
        assert_eq!(high.execute_round(&tables, &mut rng), 9);
        assert!(high.round_score() <= 90);

        let mut low = fixture(i32::MIN);
        assert_eq!(low.stamina_baseline(), 0);
        assert_eq!(low.execute_round(&tables, &mut rng), 0);
        assert!((-2..=-1).contains(&low.stamina_baseline()));
    }
}
