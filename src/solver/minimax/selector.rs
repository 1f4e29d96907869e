//! Minimax-based guess selection strategy
//!
//! Always selects the guess that minimizes the worst-case remaining candidates.

use super::calculator::evaluate_guess;
use crate::config::TieBreak;
use crate::core::Codeword;
use crate::scoring::Scorer;
use rayon::prelude::*;

/// The selected guess and how it partitions the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxChoice {
    pub guess: Codeword,
    pub worst_case: usize,
    pub is_candidate: bool,
}

/// Select best guess by minimizing worst-case remaining candidates
///
/// The guess pool is sharded across rayon workers; each evaluation only reads the
/// candidates. Shards are merged with a plain minimum over the key
/// `(worst_case, not a candidate, pool index)`, or `(worst_case, pool index)` for
/// [`TieBreak::FirstSeen`]. The pool index makes every key unique, so the result is
/// the same for any reduction order: the first minimal guess in pool order, moved
/// to the first minimal candidate when one exists and candidates are preferred.
///
/// Returns `None` if the guess pool is empty.
///
/// # Examples
/// ```
/// use mastermind_solver::config::{GameConfig, TieBreak};
/// use mastermind_solver::scoring::Scorer;
/// use mastermind_solver::solver::minimax::select_best_guess;
///
/// let config = GameConfig::classic();
/// let scorer = Scorer::new(&config);
/// let universe = config.all_codewords();
///
/// let choice = select_best_guess(&scorer, &universe, &universe, TieBreak::PreferCandidates).unwrap();
/// assert_eq!(choice.guess.to_string(), "1122");
/// assert_eq!(choice.worst_case, 256);
/// ```
#[must_use]
pub fn select_best_guess(
    scorer: &Scorer,
    guess_pool: &[Codeword],
    candidates: &[Codeword],
    tie_break: TieBreak,
) -> Option<MinimaxChoice> {
    guess_pool
        .par_iter()
        .enumerate()
        .map(|(index, guess)| {
            let eval = evaluate_guess(scorer, guess, candidates);
            let outsider = match tie_break {
                TieBreak::PreferCandidates => !eval.is_candidate,
                TieBreak::FirstSeen => false,
            };
            ((eval.worst_case, outsider, index), guess, eval)
        })
        .min_by_key(|(key, _, _)| *key)
        .map(|(_, &guess, eval)| MinimaxChoice {
            guess,
            worst_case: eval.worst_case,
            is_candidate: eval.is_candidate,
        })
}
