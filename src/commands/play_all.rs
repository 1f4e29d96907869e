//! Play every secret - comprehensive solver evaluation
//!
//! Runs the solver against every codeword in the universe (or a subset) and
//! generates statistics.

use crate::core::Codeword;
use crate::solver::{SolveError, Solver, Strategy};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Statistics from playing many games
#[derive(Debug, Clone, PartialEq)]
pub struct PlayAllStatistics {
    pub games: usize,
    pub total_turns: usize,
    pub average_turns: f64,
    pub max_turns: usize,
    /// First secret, in play order, needing `max_turns`
    pub hardest_secret: Option<Codeword>,
    pub turn_distribution: BTreeMap<usize, usize>,
    pub comparisons: u64,
    pub duration: Duration,
    /// Size of the strategy tree after the run
    pub tree_nodes: usize,
}

impl PlayAllStatistics {
    fn from_turns(secrets: &[Codeword], turns: &[usize]) -> Self {
        let mut turn_distribution = BTreeMap::new();
        let mut max_turns = 0;
        let mut hardest_secret = None;

        for (secret, &n) in secrets.iter().zip(turns) {
            *turn_distribution.entry(n).or_insert(0) += 1;
            if n > max_turns {
                max_turns = n;
                hardest_secret = Some(*secret);
            }
        }

        let total_turns: usize = turns.iter().sum();
        let average_turns = if turns.is_empty() {
            0.0
        } else {
            total_turns as f64 / turns.len() as f64
        };

        Self {
            games: turns.len(),
            total_turns,
            average_turns,
            max_turns,
            hardest_secret,
            turn_distribution,
            comparisons: 0,
            duration: Duration::ZERO,
            tree_nodes: 0,
        }
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {elapsed_precise}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// Play a game for each secret
///
/// With `parallel` the games are spread over rayon workers, all sharing the
/// solver's scorer and strategy tree. Results are gathered in `secrets` order,
/// so the statistics are the same either way.
///
/// # Errors
///
/// Returns the first `SolveError` hit by any game.
pub fn run_play_all<S: Strategy + Sync>(
    solver: &Solver<S>,
    secrets: &[Codeword],
    parallel: bool,
    show_progress: bool,
) -> Result<PlayAllStatistics, SolveError> {
    info!(
        "Playing {} games{}",
        secrets.len(),
        if parallel { " in parallel" } else { "" }
    );

    let pb = progress_bar(secrets.len(), show_progress);
    let comparisons_before = solver.scorer().comparisons();
    let start = Instant::now();

    let play = |secret: &Codeword| {
        let turns = solver.solve(secret).map(|record| record.turns());
        pb.inc(1);
        turns
    };
    let turns: Vec<usize> = if parallel {
        secrets.par_iter().map(play).collect::<Result<_, _>>()?
    } else {
        secrets.iter().map(play).collect::<Result<_, _>>()?
    };

    let duration = start.elapsed();
    pb.finish_and_clear();

    let mut stats = PlayAllStatistics::from_turns(secrets, &turns);
    stats.comparisons = solver.scorer().comparisons() - comparisons_before;
    stats.duration = duration;
    stats.tree_nodes = solver.strategy_root().node_count();
    Ok(stats)
}

/// Print play-all statistics
pub fn print_play_all_statistics(stats: &PlayAllStatistics) {
    println!("\n{}", "═".repeat(60));
    println!(" Results ");
    println!("{}", "═".repeat(60));

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Games played:        {}", stats.games);
    println!(
        "  Average turns:       {}",
        format!("{:.4}", stats.average_turns).bright_yellow().bold()
    );
    if let Some(secret) = stats.hardest_secret {
        println!(
            "  Maximum turns:       {} with secret {}",
            stats.max_turns.to_string().yellow(),
            secret.to_string().yellow()
        );
    }
    println!("  Codeword comparisons: {}", stats.comparisons);
    println!("  Strategy tree nodes: {}", stats.tree_nodes);
    println!(
        "  Elapsed time:        {:.4}s, average search {:.4}ms",
        stats.duration.as_secs_f64(),
        stats.duration.as_secs_f64() * 1000.0 / stats.games.max(1) as f64
    );

    println!("\n📈 {}", "Turn Distribution".bright_cyan().bold());
    let max_count = stats.turn_distribution.values().copied().max().unwrap_or(1);
    for (&turns, &count) in &stats.turn_distribution {
        let percentage = count as f64 / stats.games.max(1) as f64 * 100.0;
        let bar_len = (count * 40 / max_count).max(usize::from(count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!("  {turns:2} turns: {bar} {count:6} ({percentage:5.1}%)");
    }
}
