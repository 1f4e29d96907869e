//! Errors raised while playing a game

use crate::core::{Codeword, CodewordError, Score};
use std::fmt;

/// Error type for a game that cannot continue
///
/// None of these occur with a correct scorer and a valid secret; they surface
/// defects instead of hiding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The secret is not a codeword of the configured game
    InvalidSecret(CodewordError),
    /// Filtering by an observed score left no candidates
    ScoringDefect { guess: Codeword, score: Score },
    /// Minimax found no guess to evaluate
    GuessPoolExhausted { candidates: usize },
    /// The game ran longer than the universe has codewords
    TurnLimitExceeded { secret: Codeword, turns: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSecret(err) => write!(f, "Invalid secret: {err}"),
            Self::ScoringDefect { guess, score } => write!(
                f,
                "No candidate is consistent with guess {guess} scoring {score}; the scorer is inconsistent"
            ),
            Self::GuessPoolExhausted { candidates } => write!(
                f,
                "Guess pool is empty with {candidates} candidates remaining"
            ),
            Self::TurnLimitExceeded { secret, turns } => {
                write!(f, "Secret {secret} not found after {turns} turns")
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSecret(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodewordError> for SolveError {
    fn from(err: CodewordError) -> Self {
        Self::InvalidSecret(err)
    }
}
