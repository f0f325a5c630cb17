//! Round winner resolution between the two teams' top scorers.

use crate::env::{PrecisionOracle, RandomSource};
use crate::error::{MatchError, TiebreakSide};
use crate::state::{Archer, ArcherId};

/// Result of a resolved round duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TiebreakOutcome {
    pub winner: ArcherId,
    pub side: DuelSide,
    /// Number of re-shoot rounds needed to separate the archers.
    pub reshoots: u32,
}

/// Which candidate won the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuelSide {
    First,
    Second,
}

/// Decide the round winner between two candidates.
///
/// Round scores are compared first. While they are equal both archers shoot
/// again and only the new draws are compared; there is no iteration cap.
/// The winner gains experience and a round win.
///
/// # Errors
///
/// [`MatchError::MissingCandidate`] if either candidate is absent.
pub fn resolve_tiebreak<T, R>(
    first: Option<&mut Archer>,
    second: Option<&mut Archer>,
    tables: &T,
    rng: &mut R,
) -> Result<TiebreakOutcome, MatchError>
where
    T: PrecisionOracle + ?Sized,
    R: RandomSource + ?Sized,
{
    let first = first.ok_or(MatchError::MissingCandidate {
        side: TiebreakSide::First,
    })?;
    let second = second.ok_or(MatchError::MissingCandidate {
        side: TiebreakSide::Second,
    })?;

    let mut score_first = first.round_score();
    let mut score_second = second.round_score();
    let mut reshoots = 0;

    while score_first == score_second {
        score_first = first.shoot(tables, rng).score();
        score_second = second.shoot(tables, rng).score();
        reshoots += 1;
    }

    if reshoots > 0 {
        tracing::trace!(
            first = %first.id(),
            second = %second.id(),
            reshoots,
            "round tie broken by re-shoot"
        );
    }

    let (winner, side) = if score_first > score_second {
        (first, DuelSide::First)
    } else {
        (second, DuelSide::Second)
    };
    winner.gain_experience();
    winner.record_round_win();

    Ok(TiebreakOutcome {
        winner: winner.id(),
        side,
        reshoots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PrecisionTables, ScriptedRng};
    use crate::state::{ArcherProfile, Gender};

    fn duelist(id: u32) -> Archer {
        Archer::from_profile(ArcherProfile::new(ArcherId(id), Gender::Male).with_stamina(10))
    }

    #[test]
    fn higher_round_score_wins_without_reshoot() {
        let tables = PrecisionTables::default();
        let mut a = duelist(1);
        let mut b = duelist(6);
        // a: central + central, b: miss + miss
        let mut rng = ScriptedRng::new([0.0, 0.0, 0.0, 0.0]);
        a.execute_round(&tables, &mut rng);
        let mut rng = ScriptedRng::new([0.99, 0.99, 0.0, 0.0]);
        b.execute_round(&tables, &mut rng);

        let mut rng = ScriptedRng::new([0.5]);
        let outcome = resolve_tiebreak(Some(&mut a), Some(&mut b), &tables, &mut rng).unwrap();
        assert_eq!(outcome.winner, ArcherId(1));
        assert_eq!(outcome.side, DuelSide::First);
        assert_eq!(outcome.reshoots, 0);
        assert_eq!(rng.draws(), 0);
        assert_eq!(a.experience(), 13);
        assert_eq!(a.rounds_won(), 1);
        assert_eq!(b.experience(), 10);
        assert_eq!(b.rounds_won(), 0);
    }

    #[test]
    fn equal_scores_reshoot_until_different() {
        let tables = PrecisionTables::default();
        let mut a = duelist(1);
        let mut b = duelist(6);
        // Both start level at zero. Two tied re-shoots, then a: central, b: outside.
        let mut rng = ScriptedRng::new([0.1, 0.1, 0.6, 0.6, 0.1, 0.6]);
        let outcome = resolve_tiebreak(Some(&mut a), Some(&mut b), &tables, &mut rng).unwrap();
        assert_eq!(outcome.reshoots, 3);
        assert_eq!(outcome.winner, ArcherId(1));
        assert_eq!(rng.draws(), 6);
        assert_eq!(a.rounds_won(), 1);
    }

    #[test]
    fn second_candidate_can_win_reshoot() {
        let tables = PrecisionTables::default();
        let mut a = duelist(1);
        let mut b = duelist(6);
        let mut rng = ScriptedRng::new([0.99, 0.3]);
        let outcome = resolve_tiebreak(Some(&mut a), Some(&mut b), &tables, &mut rng).unwrap();
        assert_eq!(outcome.side, DuelSide::Second);
        assert_eq!(b.experience(), 13);
        assert_eq!(b.rounds_won(), 1);
        // Re-shoots never touch recorded scores.
        assert_eq!(a.round_score(), 0);
        assert_eq!(b.round_score(), 0);
    }

    #[test]
    fn missing_candidate_fails_fast() {
        let tables = PrecisionTables::default();
        let mut rng = ScriptedRng::new([0.1]);
        let mut b = duelist(6);
        assert_eq!(
            resolve_tiebreak(None, Some(&mut b), &tables, &mut rng),
            Err(MatchError::MissingCandidate {
                side: TiebreakSide::First
            })
        );
        let mut a = duelist(1);
        assert_eq!(
            resolve_tiebreak(Some(&mut a), None, &tables, &mut rng),
            Err(MatchError::MissingCandidate {
                side: TiebreakSide::Second
            })
        );
        assert_eq!(b.rounds_won(), 0);
        assert_eq!(a.rounds_won(), 0);
    }
}
