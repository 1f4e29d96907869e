//! End-to-end tests over the classic 4-pin, 6-color game
//!
//! These play every secret, compare the scorer's caches pair by pair and check the
//! regression vectors, so they exercise the crate the way the CLI does.

use mastermind_solver::commands::run_play_all;
use mastermind_solver::config::{Algorithm, GameConfig, ScoreCacheKind, TieBreak};
use mastermind_solver::core::{Codeword, Score};
use mastermind_solver::scoring::Scorer;
use mastermind_solver::solver::{Solver, StrategyNode};
use mastermind_solver::vectors;

fn classic_solver(config: GameConfig) -> Solver {
    Solver::from_config(config).unwrap()
}

/// Largest number of codewords any node stores beyond its guess and space
fn max_stored_path(node: &StrategyNode, depth: usize) -> usize {
    assert_eq!(node.played().len(), depth);
    node.children()
        .iter()
        .map(|(_, child)| max_stored_path(child, depth + 1))
        .fold(node.played().len(), usize::max)
}

fn guesses(solver: &Solver, secret: &Codeword) -> Vec<String> {
    solver
        .solve(secret)
        .unwrap()
        .guesses()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn minimax_matches_knuth_results() {
    let solver = classic_solver(GameConfig::classic());
    let secrets = solver.universe().to_vec();
    let stats = run_play_all(&solver, &secrets, true, false).unwrap();

    // 4.4761 average turns, never more than 5
    assert_eq!(stats.games, 1296);
    assert_eq!(stats.max_turns, 5);
    assert_eq!(stats.total_turns, 5801);
    assert_eq!(stats.turn_distribution.get(&1), Some(&1));
    assert_eq!(format!("{:.4}", stats.average_turns), "4.4761");

    // Node storage is bounded by the game length, not the universe
    assert!(max_stored_path(solver.strategy_root(), 1) <= 5);
}

#[test]
fn knuth_paper_sequence() {
    let config = GameConfig::classic();
    let solver = classic_solver(config.clone());
    let secret = config.parse_codeword("3632").unwrap();

    assert_eq!(
        guesses(&solver, &secret),
        ["1122", "1344", "3526", "1462", "3632"]
    );

    let record = solver.solve(&secret).unwrap();
    assert_eq!(record.moves[0].remaining_after, 256);
    for pair in record.moves.windows(2) {
        assert!(pair[1].remaining_before <= pair[0].remaining_before);
    }
}

#[test]
fn dense_and_sparse_agree_with_uncached_on_every_pair() {
    let config = GameConfig::classic();
    let universe = config.all_codewords();
    let plain = Scorer::uncached();
    let dense = Scorer::new(&config.clone().with_score_cache(ScoreCacheKind::Dense));
    let sparse = Scorer::new(&config.with_score_cache(ScoreCacheKind::Sparse));
    dense.precompute(&universe);

    for secret in &universe {
        for guess in &universe {
            let expected = plain.score(secret, guess);
            assert_eq!(dense.score(secret, guess), expected);
            assert_eq!(sparse.score(secret, guess), expected);
            assert_eq!(plain.score(guess, secret), expected);
            assert!(expected.exact() + expected.misplaced() <= 4);
        }
        assert_eq!(plain.score(secret, secret), Score::winning(4));
    }
    assert_eq!(sparse.cached_entries(), 1296 * 1296);
}

#[test]
fn strategy_tree_does_not_change_games() {
    let config = GameConfig::classic();
    let cached = classic_solver(config.clone());
    let uncached = classic_solver(config.with_strategy_cache(false));

    for secret in cached.universe().iter().step_by(37) {
        assert_eq!(guesses(&cached, secret), guesses(&uncached, secret));
    }
    assert_eq!(uncached.strategy_root().node_count(), 1);
}

#[test]
fn score_cache_does_not_change_games() {
    let config = GameConfig::classic();
    let dense = classic_solver(config.clone());
    let none = classic_solver(config.with_score_cache(ScoreCacheKind::None));

    for secret in dense.universe().iter().step_by(53) {
        assert_eq!(guesses(&dense, secret), guesses(&none, secret));
    }
}

#[test]
fn candidate_strategies_solve_every_secret() {
    for algorithm in [Algorithm::FirstCandidate, Algorithm::RandomCandidate] {
        let config = GameConfig::classic()
            .with_algorithm(algorithm)
            .with_seed(Some(2024));
        let solver = classic_solver(config);
        let secrets = solver.universe().to_vec();
        let stats = run_play_all(&solver, &secrets, false, false).unwrap();

        assert_eq!(stats.games, 1296);
        assert!(stats.max_turns <= 10, "{algorithm}: {}", stats.max_turns);
        assert!(stats.average_turns > 4.4, "{algorithm}: {}", stats.average_turns);
    }
}

#[test]
fn first_seen_tie_break_still_solves_everything() {
    let config = GameConfig::classic().with_tie_break(TieBreak::FirstSeen);
    let solver = classic_solver(config);
    let secrets = solver.universe().to_vec();
    let stats = run_play_all(&solver, &secrets, true, false).unwrap();

    assert_eq!(stats.games, 1296);
    assert!(stats.max_turns <= 7);
    assert!(stats.average_turns < 5.0);
}

#[test]
fn generated_vectors_verify() {
    let config = GameConfig::classic();
    let generated: Vec<_> = vectors::generate(&config, true).collect();
    assert_eq!(generated.len(), 14 + 1296 * 1296);

    let mut buffer = Vec::new();
    vectors::write_vectors(&mut buffer, generated[..500].iter().copied()).unwrap();
    let parsed = vectors::parse_vectors(buffer.as_slice()).unwrap();
    assert_eq!(parsed, generated[..500]);

    let report = vectors::verify(&Scorer::new(&config), &generated);
    assert!(report.is_success(), "{report}");
    assert_eq!(report.total, generated.len());
}

#[test]
fn vector_generation_is_lazy() {
    // 5p8c has 2^30 pairs; taking a few must not score or store the rest
    let config = GameConfig::new(5, 8).unwrap();
    let first: Vec<_> = vectors::generate(&config, false).take(3).collect();
    assert_eq!(first[0].to_string(), "11111,11111,5,0");
    assert_eq!(first[2].to_string(), "11111,11113,4,0");

    let (lower, _) = vectors::generate(&config, false).size_hint();
    assert_eq!(lower, 32_768 * 32_768);
}

#[test]
fn opening_scores_partition_the_universe() {
    let config = GameConfig::classic();
    let scorer = Scorer::new(&config);
    let opening = config.opening_guess();

    let mut seen = std::collections::BTreeSet::new();
    for code in config.all_codewords() {
        seen.insert(scorer.score(&code, &opening));
    }
    assert!(seen.len() <= Score::possible_count(4));
    assert!(seen.contains(&Score::winning(4)));
}
