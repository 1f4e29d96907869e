//! Minimax (Knuth) guess selection
//!
//! Implements worst-case minimization: each guess is rated by the largest group of
//! candidates that would share a score, and the guess with the smallest such group
//! wins.

mod calculator;
mod selector;

pub use calculator::{GuessEvaluation, calculate_max_remaining, evaluate_guess, partition_sizes};
pub use selector::{MinimaxChoice, select_best_guess};
