//! Solution space maintenance
//!
//! The set of codewords still consistent with every (guess, score) pair observed in
//! the current game.

use super::SolveError;
use crate::core::{Codeword, Score};
use crate::scoring::Scorer;

/// Candidates consistent with the feedback so far, in universe order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionSpace {
    candidates: Vec<Codeword>,
}

impl SolutionSpace {
    #[must_use]
    pub const fn new(candidates: Vec<Codeword>) -> Self {
        Self { candidates }
    }

    /// The starting space: the whole universe minus the opening guess
    #[must_use]
    pub fn full(universe: &[Codeword], opening: &Codeword) -> Self {
        Self::new(
            universe
                .iter()
                .filter(|&code| code != opening)
                .copied()
                .collect(),
        )
    }

    /// Keep only the candidates that would have produced `observed` for `guess`
    ///
    /// Returns a new space; `self` is left untouched so cached strategy nodes stay
    /// valid for other games. Since scoring is commutative, a candidate `c` survives
    /// iff `score(c, guess) == observed`, and the true secret always survives.
    ///
    /// # Errors
    /// Returns `SolveError::ScoringDefect` if nothing survives.
    pub fn filter_consistent(
        &self,
        scorer: &Scorer,
        guess: &Codeword,
        observed: Score,
    ) -> Result<Self, SolveError> {
        let candidates: Vec<Codeword> = self
            .candidates
            .iter()
            .filter(|&candidate| scorer.score_uncounted(candidate, guess) == observed)
            .copied()
            .collect();
        scorer.record_comparisons(self.candidates.len());

        if candidates.is_empty() {
            return Err(SolveError::ScoringDefect {
                guess: *guess,
                score: observed,
            });
        }

        Ok(Self { candidates })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn contains(&self, code: &Codeword) -> bool {
        self.candidates.contains(code)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Codeword> {
        self.candidates.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Codeword> {
        self.candidates.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Codeword] {
        &self.candidates
    }
}

impl<'a> IntoIterator for &'a SolutionSpace {
    type Item = &'a Codeword;
    type IntoIter = std::slice::Iter<'a, Codeword>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn setup() -> (GameConfig, Vec<Codeword>, Scorer) {
        let config = GameConfig::classic();
        let universe = config.all_codewords();
        let scorer = Scorer::new(&config);
        (config, universe, scorer)
    }

    #[test]
    fn full_space_excludes_opening() {
        let (config, universe, _) = setup();
        let opening = config.opening_guess();
        let space = SolutionSpace::full(&universe, &opening);

        assert_eq!(space.len(), 1295);
        assert!(!space.contains(&opening));
        assert_eq!(space.first().map(ToString::to_string).as_deref(), Some("1111"));
    }

    #[test]
    fn filter_keeps_secret_and_shrinks() {
        let (config, universe, scorer) = setup();
        let secret = config.parse_codeword("3632").unwrap();
        let mut space = SolutionSpace::full(&universe, &config.opening_guess());

        for guess in ["1122", "1344", "3526", "1462"] {
            let guess = config.parse_codeword(guess).unwrap();
            let score = scorer.score(&secret, &guess);
            let next = space.filter_consistent(&scorer, &guess, score).unwrap();

            assert!(next.contains(&secret));
            assert!(next.len() <= space.len());
            assert!(next.iter().all(|c| space.contains(c)));
            space = next;
        }
    }

    #[test]
    fn filter_after_opening_knuth_example() {
        // Knuth: 1122 against 3632 scores (1,0) and leaves 256 candidates
        let (config, universe, scorer) = setup();
        let secret = config.parse_codeword("3632").unwrap();
        let opening = config.opening_guess();
        let space = SolutionSpace::full(&universe, &opening);

        let score = scorer.score(&secret, &opening);
        assert_eq!(score, Score::new(1, 0));

        let next = space.filter_consistent(&scorer, &opening, score).unwrap();
        assert_eq!(next.len(), 256);
    }

    #[test]
    fn filter_leaves_original_untouched() {
        let (config, universe, scorer) = setup();
        let opening = config.opening_guess();
        let space = SolutionSpace::full(&universe, &opening);
        let before = space.clone();

        let _ = space.filter_consistent(&scorer, &opening, Score::new(0, 0));
        assert_eq!(space, before);
    }

    #[test]
    fn impossible_score_is_a_defect() {
        let (config, universe, scorer) = setup();
        let guess = config.parse_codeword("1111").unwrap();
        let space = SolutionSpace::new(universe);

        // No codeword scores (3,1) against anything in a 4-pin game
        let result = space.filter_consistent(&scorer, &guess, Score::new(3, 1));
        assert_eq!(
            result,
            Err(SolveError::ScoringDefect {
                guess,
                score: Score::new(3, 1)
            })
        );
    }

    #[test]
    fn filter_counts_comparisons() {
        let (config, universe, scorer) = setup();
        let guess = config.opening_guess();
        let space = SolutionSpace::new(universe);
        let _ = space.filter_consistent(&scorer, &guess, Score::new(0, 0));
        assert_eq!(scorer.comparisons(), 1296);
    }
}
