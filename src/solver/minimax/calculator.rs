//! Minimax worst-case calculation for Mastermind scores
//!
//! Given a guess and set of candidates, computes the maximum remaining candidates
//! for any possible score.

use crate::core::{Codeword, Score};
use crate::scoring::Scorer;
use rustc_hash::FxHashMap;

/// How a single guess partitions the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessEvaluation {
    /// Size of the largest partition
    pub worst_case: usize,
    /// Whether the guess is itself one of the candidates
    pub is_candidate: bool,
}

/// Rate a guess against the candidates
///
/// Tallies the candidates per score in a flat array indexed by the packed score
/// byte, then takes the largest tally. A candidate scoring the winning score is the
/// guess itself.
#[must_use]
pub fn evaluate_guess(scorer: &Scorer, guess: &Codeword, candidates: &[Codeword]) -> GuessEvaluation {
    let winning = Score::winning(guess.pin_count());
    let mut counts = [0usize; 256];
    let mut is_candidate = false;

    for candidate in candidates {
        let score = scorer.score_uncounted(candidate, guess);
        counts[usize::from(score.value())] += 1;
        if score == winning {
            is_candidate = true;
        }
    }
    scorer.record_comparisons(candidates.len());

    GuessEvaluation {
        worst_case: counts.iter().copied().max().unwrap_or(0),
        is_candidate,
    }
}

/// Calculate the maximum remaining candidates for a guess
///
/// Returns the worst-case number of remaining candidates after this guess.
///
/// # Examples
/// ```
/// use mastermind_solver::config::GameConfig;
/// use mastermind_solver::scoring::Scorer;
/// use mastermind_solver::solver::minimax::calculate_max_remaining;
///
/// let config = GameConfig::classic();
/// let scorer = Scorer::new(&config);
/// let universe = config.all_codewords();
///
/// // Knuth's opening leaves at most 256 candidates
/// let opening = config.opening_guess();
/// assert_eq!(calculate_max_remaining(&scorer, &opening, &universe), 256);
/// ```
#[must_use]
pub fn calculate_max_remaining(scorer: &Scorer, guess: &Codeword, candidates: &[Codeword]) -> usize {
    evaluate_guess(scorer, guess, candidates).worst_case
}

/// Group candidates by the score they produce with the guess
#[must_use]
pub fn partition_sizes(
    scorer: &Scorer,
    guess: &Codeword,
    candidates: &[Codeword],
) -> FxHashMap<Score, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates {
        let score = scorer.score(candidate, guess);
        *counts.entry(score).or_insert(0) += 1;
    }

    counts
}
