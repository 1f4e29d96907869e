//! Benchmark command
//!
//! Plays every secret with each algorithm and compares the results.

use super::play_all::{PlayAllStatistics, run_play_all};
use crate::config::{Algorithm, GameConfig};
use crate::solver::Solver;
use anyhow::Context;
use colored::Colorize;
use log::info;

/// Result of running one algorithm over the universe
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub algorithm: Algorithm,
    pub stats: PlayAllStatistics,
    /// Games solved per second
    pub games_per_second: f64,
}

/// Run every algorithm over the whole universe of `config`
///
/// Each algorithm gets a fresh solver, so no strategy tree or score cache is
/// shared between them.
///
/// # Errors
///
/// Returns an error if the configuration is rejected or a game fails.
pub fn run_benchmark(
    config: &GameConfig,
    algorithms: &[Algorithm],
    parallel: bool,
) -> anyhow::Result<Vec<BenchmarkResult>> {
    algorithms
        .iter()
        .map(|&algorithm| {
            info!("Benchmarking {algorithm}");
            let solver = Solver::from_config(config.clone().with_algorithm(algorithm))
                .with_context(|| format!("Cannot build a {algorithm} solver"))?;
            let secrets = solver.universe().to_vec();
            let stats = run_play_all(&solver, &secrets, parallel, false)
                .with_context(|| format!("{algorithm} failed"))?;

            let seconds = stats.duration.as_secs_f64();
            let games_per_second = if seconds > 0.0 {
                stats.games as f64 / seconds
            } else {
                0.0
            };

            Ok(BenchmarkResult {
                algorithm,
                stats,
                games_per_second,
            })
        })
        .collect()
}

/// Print a table comparing algorithms
pub fn print_benchmark_results(results: &[BenchmarkResult]) {
    println!("\n{}", "═".repeat(76).cyan());
    println!(" {} ", "ALGORITHM COMPARISON".bright_cyan().bold());
    println!("{}", "═".repeat(76).cyan());
    println!(
        "\n  {:<18} {:>9} {:>6} {:>8} {:>16} {:>10} {:>10}",
        "Algorithm", "Avg", "Max", "Hardest", "Comparisons", "Time", "Games/s"
    );

    let best_average = results
        .iter()
        .map(|r| r.stats.average_turns)
        .fold(f64::INFINITY, f64::min);

    for result in results {
        let average = format!("{:>9.4}", result.stats.average_turns);
        let average = if (result.stats.average_turns - best_average).abs() < f64::EPSILON {
            average.bright_green().bold()
        } else {
            average.yellow()
        };
        let hardest = result
            .stats
            .hardest_secret
            .map_or_else(|| "-".to_string(), |c| c.to_string());

        println!(
            "  {:<18} {} {:>6} {:>8} {:>16} {:>9.3}s {:>10.0}",
            result.algorithm.to_string(),
            average,
            result.stats.max_turns,
            hardest,
            result.stats.comparisons,
            result.stats.duration.as_secs_f64(),
            result.games_per_second
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_runs_every_algorithm() {
        let config = GameConfig::new(3, 3).unwrap().with_seed(Some(3));
        let results = run_benchmark(&config, &Algorithm::ALL, false).unwrap();

        assert_eq!(results.len(), 3);
        for (result, algorithm) in results.iter().zip(Algorithm::ALL) {
            assert_eq!(result.algorithm, algorithm);
            assert_eq!(result.stats.games, 27);
            assert!(result.stats.average_turns >= 1.0);
        }
    }

    #[test]
    fn benchmark_rejects_bad_config() {
        let config = GameConfig::new(8, 8)
            .unwrap()
            .with_score_cache(crate::config::ScoreCacheKind::Dense);
        assert!(run_benchmark(&config, &[Algorithm::Minimax], false).is_err());
    }
}
