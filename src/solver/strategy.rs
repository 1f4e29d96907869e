//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use super::SolutionSpace;
use crate::config::{Algorithm, GameConfig, TieBreak};
use crate::core::Codeword;
use crate::scoring::Scorer;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use std::sync::{Mutex, PoisonError};

/// A strategy for selecting the next guess
pub trait Strategy {
    /// Select the next guess given the remaining candidates
    ///
    /// `guess_pool` holds every codeword not yet played; it is only populated for
    /// strategies whose [`uses_guess_pool`](Self::uses_guess_pool) is true.
    /// Returns `None` if there is nothing to choose from.
    fn select_guess(
        &self,
        scorer: &Scorer,
        guess_pool: &[Codeword],
        candidates: &SolutionSpace,
    ) -> Option<Codeword>;

    /// Whether this strategy may guess codewords that are no longer candidates
    fn uses_guess_pool(&self) -> bool {
        false
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// First remaining candidate
    FirstCandidate(FirstCandidate),
    /// Random remaining candidate
    RandomCandidate(RandomCandidate),
    /// Knuth's minimax
    Minimax(MinimaxStrategy),
}

impl Strategy for StrategyType {
    fn select_guess(
        &self,
        scorer: &Scorer,
        guess_pool: &[Codeword],
        candidates: &SolutionSpace,
    ) -> Option<Codeword> {
        match self {
            Self::FirstCandidate(s) => s.select_guess(scorer, guess_pool, candidates),
            Self::RandomCandidate(s) => s.select_guess(scorer, guess_pool, candidates),
            Self::Minimax(s) => s.select_guess(scorer, guess_pool, candidates),
        }
    }

    fn uses_guess_pool(&self) -> bool {
        match self {
            Self::FirstCandidate(s) => s.uses_guess_pool(),
            Self::RandomCandidate(s) => s.uses_guess_pool(),
            Self::Minimax(s) => s.uses_guess_pool(),
        }
    }
}

impl StrategyType {
    /// Create the strategy a configuration asks for
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        match config.algorithm {
            Algorithm::FirstCandidate => Self::FirstCandidate(FirstCandidate),
            Algorithm::RandomCandidate => Self::RandomCandidate(RandomCandidate::new(config.seed)),
            Algorithm::Minimax => Self::Minimax(MinimaxStrategy::new(config.tie_break)),
        }
    }

    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::FirstCandidate(_) => Algorithm::FirstCandidate,
            Self::RandomCandidate(_) => Algorithm::RandomCandidate,
            Self::Minimax(_) => Algorithm::Minimax,
        }
    }
}

/// Plays the first remaining candidate in universe order
pub struct FirstCandidate;

impl Strategy for FirstCandidate {
    fn select_guess(
        &self,
        _scorer: &Scorer,
        _guess_pool: &[Codeword],
        candidates: &SolutionSpace,
    ) -> Option<Codeword> {
        candidates.first().copied()
    }
}

/// Plays a uniformly random remaining candidate
pub struct RandomCandidate {
    rng: Mutex<StdRng>,
}

impl RandomCandidate {
    /// Create a random strategy, reproducible when seeded
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Strategy for RandomCandidate {
    fn select_guess(
        &self,
        _scorer: &Scorer,
        _guess_pool: &[Codeword],
        candidates: &SolutionSpace,
    ) -> Option<Codeword> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates.as_slice().choose(&mut *rng).copied()
    }
}

/// Knuth's minimax strategy
///
/// Always selects the guess that minimizes worst-case remaining candidates,
/// searching every codeword not yet played.
pub struct MinimaxStrategy {
    pub tie_break: TieBreak,
}

impl MinimaxStrategy {
    #[must_use]
    pub const fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

impl Strategy for MinimaxStrategy {
    fn select_guess(
        &self,
        scorer: &Scorer,
        guess_pool: &[Codeword],
        candidates: &SolutionSpace,
    ) -> Option<Codeword> {
        super::minimax::select_best_guess(scorer, guess_pool, candidates.as_slice(), self.tie_break)
            .map(|choice| choice.guess)
    }

    fn uses_guess_pool(&self) -> bool {
        true
    }
}
