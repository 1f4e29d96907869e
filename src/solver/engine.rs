//! Main Mastermind solver interface

use super::strategy::{Strategy, StrategyType};
use super::tree::StrategyNode;
use super::{SolutionSpace, SolveError};
use crate::config::{ConfigError, GameConfig};
use crate::core::{Codeword, Score};
use crate::scoring::Scorer;
use log::{debug, trace};
use std::sync::Arc;

/// One turn of a played game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub guess: Codeword,
    pub score: Score,
    /// Candidates still possible when the guess was played
    pub remaining_before: usize,
    /// Candidates consistent with the score, 0 once the secret is found
    pub remaining_after: usize,
    /// Whether the guess came from the strategy tree rather than fresh work
    pub from_cache: bool,
}

/// The full transcript of a solved game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub secret: Codeword,
    pub moves: Vec<Move>,
}

impl GameRecord {
    /// Number of guesses played, including the winning one
    #[must_use]
    pub fn turns(&self) -> usize {
        self.moves.len()
    }

    /// The guesses in the order they were played
    pub fn guesses(&self) -> impl Iterator<Item = &Codeword> {
        self.moves.iter().map(|m| &m.guess)
    }
}

/// Main Mastermind solver
///
/// Plays games against known secrets, sharing one scorer and one strategy tree
/// across every game. `solve` takes `&self`, so a single solver can play many
/// games in parallel.
pub struct Solver<S: Strategy = StrategyType> {
    config: GameConfig,
    strategy: S,
    scorer: Scorer,
    universe: Vec<Codeword>,
    root: Arc<StrategyNode>,
}

impl Solver<StrategyType> {
    /// Create a solver using the algorithm named in the configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        let strategy = StrategyType::from_config(&config);
        Self::new(config, strategy)
    }
}

impl<S: Strategy> Solver<S> {
    /// Create a new solver with the given strategy
    ///
    /// Enumerates the universe and builds the root of the strategy tree.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(config: GameConfig, strategy: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let scorer = Scorer::new(&config);
        let universe = config.all_codewords();
        let root = Arc::new(Self::root_node(&config, &universe));

        debug!(
            "Solver ready: {}p{}c, {} codewords, opening {}",
            config.pin_count(),
            config.color_count(),
            universe.len(),
            root.guess()
        );

        Ok(Self {
            config,
            strategy,
            scorer,
            universe,
            root,
        })
    }

    fn root_node(config: &GameConfig, universe: &[Codeword]) -> StrategyNode {
        let opening = config.opening_guess();
        StrategyNode::new(opening, SolutionSpace::full(universe, &opening), vec![opening])
    }

    /// Play a game against `secret` and return every move made
    ///
    /// Each turn scores the current guess; on a miss the strategy tree is consulted
    /// for the follow-up, and only when the tree has no answer yet (or the tree is
    /// disabled) are the candidates filtered and a new guess selected.
    ///
    /// # Errors
    /// Returns `SolveError` if the secret is not a codeword of this game, or if
    /// the scorer or strategy misbehave.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::config::GameConfig;
    /// use mastermind_solver::solver::Solver;
    ///
    /// let config = GameConfig::classic();
    /// let solver = Solver::from_config(config.clone()).unwrap();
    /// let secret = config.parse_codeword("3632").unwrap();
    ///
    /// let record = solver.solve(&secret).unwrap();
    /// let guesses: Vec<String> = record.guesses().map(ToString::to_string).collect();
    /// assert_eq!(guesses, ["1122", "1344", "3526", "1462", "3632"]);
    /// ```
    pub fn solve(&self, secret: &Codeword) -> Result<GameRecord, SolveError> {
        let secret = self.config.resolve(secret)?;
        let winning = self.config.winning_score();

        debug!("Starting with secret {secret}");
        debug!(
            "Solution space contains {} possibilities",
            self.root.solution_space().len()
        );
        debug!("Initial guess is {}", self.root.guess());

        let mut node = Arc::clone(&self.root);
        let mut moves: Vec<Move> = Vec::new();
        let mut from_cache = false;

        loop {
            let guess = *node.guess();
            let score = self.scorer.score(&secret, &guess);
            let remaining_before = node.solution_space().len();
            debug!("Tried guess {guess} against secret {secret} => {score}");

            if score == winning {
                moves.push(Move {
                    guess,
                    score,
                    remaining_before,
                    remaining_after: 0,
                    from_cache,
                });
                debug!("Solution found after {} tries", moves.len());
                return Ok(GameRecord { secret, moves });
            }

            if moves.len() + 1 >= self.universe.len() {
                return Err(SolveError::TurnLimitExceeded {
                    secret,
                    turns: moves.len() + 1,
                });
            }

            let cached = if self.config.strategy_cache {
                node.child(score)
            } else {
                None
            };
            let next_from_cache = cached.is_some();

            let next = match cached {
                Some(child) => {
                    trace!("Strategy tree has {} after {guess}/{score}", child.guess());
                    child
                }
                None => {
                    let child = self.advance(&node, score)?;
                    if self.config.strategy_cache {
                        node.insert_child(score, child)
                    } else {
                        Arc::new(child)
                    }
                }
            };

            moves.push(Move {
                guess,
                score,
                remaining_before,
                remaining_after: next.solution_space().len(),
                from_cache,
            });
            from_cache = next_from_cache;
            node = next;
        }
    }

    /// Work out the node that follows `node` when its guess scores `score`
    fn advance(&self, node: &StrategyNode, score: Score) -> Result<StrategyNode, SolveError> {
        let guess = node.guess();
        debug!("Removing solutions that have no chance of being correct...");
        let space = node
            .solution_space()
            .filter_consistent(&self.scorer, guess, score)?;
        debug!("Solution space now contains {} possibilities", space.len());

        let next = match space.as_slice() {
            [only] => {
                debug!("Only remaining solution must be correct: {only}");
                *only
            }
            [first, _] => {
                debug!("Two solutions remain, playing the first: {first}");
                *first
            }
            _ => {
                let guess_pool = self.guess_pool(node);
                let next = self
                    .strategy
                    .select_guess(&self.scorer, &guess_pool, &space)
                    .ok_or(SolveError::GuessPoolExhausted {
                        candidates: space.len(),
                    })?;
                debug!("Selected guess {next}");
                next
            }
        };

        let mut played = Vec::with_capacity(node.played().len() + 1);
        played.extend_from_slice(node.played());
        played.push(next);
        Ok(StrategyNode::new(next, space, played))
    }

    /// Codewords not yet played on the path to `node`, in universe order
    ///
    /// Empty for strategies that only ever guess candidates.
    fn guess_pool(&self, node: &StrategyNode) -> Vec<Codeword> {
        if !self.strategy.uses_guess_pool() {
            return Vec::new();
        }
        self.universe
            .iter()
            .filter(|&c| !node.has_played(c))
            .copied()
            .collect()
    }

    /// Root of the strategy tree built by the games played so far
    #[must_use]
    pub fn strategy_root(&self) -> &StrategyNode {
        &self.root
    }

    /// Discard the strategy tree, keeping the scorer and its cache
    pub fn reset_strategy(&mut self) {
        self.root = Arc::new(Self::root_node(&self.config, &self.universe));
    }

    #[must_use]
    pub const fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Every codeword of the game, in ordinal order
    #[must_use]
    pub fn universe(&self) -> &[Codeword] {
        &self.universe
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Algorithm, ScoreCacheKind};
    use crate::solver::strategy::FirstCandidate;

    /// Never finds a guess
    struct NoGuess;

    impl Strategy for NoGuess {
        fn select_guess(&self, _: &Scorer, _: &[Codeword], _: &SolutionSpace) -> Option<Codeword> {
            None
        }
    }

    /// Keeps playing the same codeword, which never narrows the space again
    struct Stubborn(Codeword);

    impl Strategy for Stubborn {
        fn select_guess(&self, _: &Scorer, _: &[Codeword], _: &SolutionSpace) -> Option<Codeword> {
            Some(self.0)
        }
    }

    fn classic_solver() -> Solver {
        Solver::from_config(GameConfig::classic()).unwrap()
    }

    fn code(config: &GameConfig, s: &str) -> Codeword {
        config.parse_codeword(s).unwrap()
    }

    #[test]
    fn knuth_paper_example() {
        let solver = classic_solver();
        let secret = code(solver.config(), "3632");
        let record = solver.solve(&secret).unwrap();

        let guesses: Vec<String> = record.guesses().map(ToString::to_string).collect();
        assert_eq!(guesses, ["1122", "1344", "3526", "1462", "3632"]);
        assert_eq!(record.turns(), 5);

        let first = record.moves[0];
        assert_eq!(first.score, Score::new(1, 0));
        // The opening guess itself is not a candidate once played
        assert_eq!(first.remaining_before, 1295);
        assert_eq!(first.remaining_after, 256);

        let last = record.moves[4];
        assert!(last.score.is_winning(4));
        assert_eq!(last.remaining_after, 0);
    }

    #[test]
    fn opening_secret_wins_immediately() {
        let solver = classic_solver();
        let record = solver.solve(&code(solver.config(), "1122")).unwrap();
        assert_eq!(record.turns(), 1);
        assert_eq!(solver.strategy_root().child_count(), 0);
    }

    #[test]
    fn second_game_replays_tree() {
        let solver = classic_solver();
        let secret = code(solver.config(), "3632");

        let first = solver.solve(&secret).unwrap();
        assert!(first.moves.iter().all(|m| !m.from_cache));

        let comparisons = solver.scorer().comparisons();
        let second = solver.solve(&secret).unwrap();
        assert_eq!(first.guesses().collect::<Vec<_>>(), second.guesses().collect::<Vec<_>>());
        assert!(second.moves[1..].iter().all(|m| m.from_cache));
        // Only the five guesses are scored again
        assert_eq!(solver.scorer().comparisons() - comparisons, 5);
    }

    #[test]
    fn disabled_tree_stays_empty() {
        let config = GameConfig::classic().with_strategy_cache(false);
        let solver = Solver::from_config(config.clone()).unwrap();
        let record = solver.solve(&code(&config, "3632")).unwrap();

        assert_eq!(record.turns(), 5);
        assert!(record.moves.iter().all(|m| !m.from_cache));
        assert_eq!(solver.strategy_root().node_count(), 1);
    }

    #[test]
    fn reset_strategy_discards_tree() {
        let mut solver = classic_solver();
        let secret = code(solver.config(), "3632");
        solver.solve(&secret).unwrap();
        assert_eq!(solver.strategy_root().depth(), 5);

        solver.reset_strategy();
        assert_eq!(solver.strategy_root().node_count(), 1);
        assert_eq!(solver.strategy_root().guess().to_string(), "1122");
    }

    #[test]
    fn rejects_foreign_secret() {
        let solver = classic_solver();
        let secret: Codeword = "1177".parse().unwrap();
        assert!(matches!(
            solver.solve(&secret),
            Err(SolveError::InvalidSecret(_))
        ));

        let secret: Codeword = "11223".parse().unwrap();
        assert!(matches!(
            solver.solve(&secret),
            Err(SolveError::InvalidSecret(_))
        ));
    }

    #[test]
    fn first_candidate_solves() {
        let config = GameConfig::classic();
        let solver = Solver::new(config.clone(), FirstCandidate).unwrap();

        let record = solver.solve(&code(&config, "6543")).unwrap();
        assert!(record.moves.last().unwrap().score.is_winning(4));
    }

    #[test]
    fn small_game_solves_every_secret() {
        let config = GameConfig::new(3, 3)
            .unwrap()
            .with_algorithm(Algorithm::RandomCandidate)
            .with_seed(Some(7))
            .with_score_cache(ScoreCacheKind::Sparse);
        let solver = Solver::from_config(config).unwrap();

        for secret in solver.universe().to_vec() {
            let record = solver.solve(&secret).unwrap();
            assert_eq!(record.moves.last().unwrap().guess, secret);
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = GameConfig::new(8, 8)
            .unwrap()
            .with_score_cache(ScoreCacheKind::Dense);
        assert!(Solver::from_config(config).is_err());
    }

    #[test]
    fn nodes_store_only_their_path() {
        let solver = classic_solver();
        let secret = code(solver.config(), "3632");
        let record = solver.solve(&secret).unwrap();

        let mut node = Arc::clone(&solver.root);
        for (depth, step) in record.moves.iter().enumerate() {
            assert_eq!(node.played().len(), depth + 1);
            assert_eq!(node.played().last(), Some(&step.guess));
            match node.child(step.score) {
                Some(child) => node = child,
                None => break,
            }
        }
    }

    #[test]
    fn strategy_without_guess_exhausts_pool() {
        let config = GameConfig::classic();
        let solver = Solver::new(config.clone(), NoGuess).unwrap();

        let result = solver.solve(&code(&config, "3632"));
        assert!(matches!(
            result,
            Err(SolveError::GuessPoolExhausted { candidates: 256 })
        ));
    }

    #[test]
    fn repeated_guess_hits_turn_limit() {
        let config = GameConfig::classic();
        let solver = Solver::new(config.clone(), Stubborn(code(&config, "6666"))).unwrap();

        let result = solver.solve(&code(&config, "3632"));
        assert!(matches!(
            result,
            Err(SolveError::TurnLimitExceeded { turns: 1296, .. })
        ));
    }
}
