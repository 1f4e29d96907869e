//! Mastermind Solver - CLI
//!
//! Plays Mastermind for one secret or for every secret, compares algorithms,
//! and writes regression vectors and strategy graphs.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use log::info;
use mastermind_solver::{
    commands::{
        analyze_guess, export_strategy, generate_file, parse_feedback, print_benchmark_results,
        print_play_all_statistics, run_benchmark, run_play_all, solve_secret, vector_file_name,
        verify_file,
    },
    config::{Algorithm, GameConfig, ScoreCacheKind, TieBreak},
    core::Codeword,
    output::{
        graphviz::strategy_file_name, print_analysis_result, print_solve_result,
        print_verify_report,
    },
    scoring::Scorer,
    solver::Solver,
};
use std::path::PathBuf;

/// Secret from Knuth's paper, solved as 1122, 1344, 3526, 1462, 3632
const KNUTH_SECRET: &str = "3632";

#[derive(Parser)]
#[command(
    name = "mastermind",
    about = "Mastermind solver using Knuth's minimax algorithm (4.4761 avg turns for 4p6c)",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of pins per codeword
    #[arg(short, long, global = true, default_value_t = 4)]
    pins: u8,

    /// Number of colors per pin
    #[arg(short, long, global = true, default_value_t = 6)]
    colors: u8,

    /// Guess selection algorithm
    #[arg(short, long, global = true, value_enum, default_value = "minimax")]
    algorithm: Algorithm,

    /// Minimax tie-break among guesses with the same worst case
    #[arg(long, global = true, value_enum, default_value = "prefer-candidates")]
    tie_break: TieBreak,

    /// Score cache (default: dense when the table is small enough, none otherwise)
    #[arg(long, global = true, value_enum)]
    score_cache: Option<ScoreCacheKind>,

    /// Work out every guess afresh instead of reusing the strategy tree
    #[arg(long, global = true)]
    no_strategy_cache: bool,

    /// Seed for the random-candidate algorithm
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// More logging (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Self-test, Knuth's example game, then every secret (default)
    Demo,

    /// Solve a specific secret
    Solve {
        /// The secret to find, one hex digit per pin (e.g. 3632)
        secret: String,
    },

    /// Play the game for every possible secret
    All {
        /// Spread the games over all cores
        #[arg(long)]
        parallel: bool,

        /// Only play the first N secrets
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Compare every algorithm over all secrets
    Benchmark {
        /// Spread the games over all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Show how a guess partitions the remaining candidates
    Analyze {
        /// Guess to analyze
        guess: String,

        /// Feedback already received, as guess=score (e.g. 1122=10); repeatable
        #[arg(long = "after")]
        after: Vec<String>,
    },

    /// Scoring regression vectors
    Vectors {
        #[command(subcommand)]
        action: VectorsAction,
    },

    /// Play every secret and write the strategy tree as a Graphviz file
    Graph {
        /// Output file (default: mastermind_strategy_{pins}p{colors}c.gv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum VectorsAction {
    /// Write a vector for every pair of codewords
    Generate {
        /// Output file (default: mastermind_{pins}p{colors}c.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out Miyoshi's reference cases
        #[arg(long)]
        no_reference: bool,
    },

    /// Check the scorer against a vector file
    Verify {
        /// Input file (default: mastermind_{pins}p{colors}c.txt)
        input: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Build the game configuration from the global flags
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::new(cli.pins, cli.colors)
        .context("Invalid game size")?
        .with_algorithm(cli.algorithm)
        .with_tie_break(cli.tie_break)
        .with_strategy_cache(!cli.no_strategy_cache)
        .with_seed(cli.seed);
    if let Some(kind) = cli.score_cache {
        config = config.with_score_cache(kind);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Create the solver and check its scorer before any game is played
fn build_solver(config: &GameConfig) -> Result<Solver> {
    let solver = Solver::from_config(config.clone()).context("Cannot create solver")?;
    solver
        .scorer()
        .self_test()
        .context("Scorer failed its self-test")?;
    solver.scorer().reset_comparisons();
    Ok(solver)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    info!(
        "Mastermind {}p{}c: {} codewords, algorithm {}",
        config.pin_count(),
        config.color_count(),
        config.universe_size(),
        config.algorithm
    );

    // Default to the demo if no command given
    let command = cli.command.unwrap_or(Commands::Demo);
    let verbose = cli.verbose > 0;

    match command {
        Commands::Demo => run_demo_command(&config),
        Commands::Solve { secret } => run_solve_command(&config, &secret, verbose),
        Commands::All { parallel, limit } => run_all_command(&config, parallel, limit),
        Commands::Benchmark { parallel } => run_benchmark_command(&config, parallel),
        Commands::Analyze { guess, after } => run_analyze_command(&config, &guess, &after),
        Commands::Vectors { action } => run_vectors_command(&config, action),
        Commands::Graph { output } => run_graph_command(&config, output),
    }
}

/// Knuth's secret when it fits the game, otherwise the last codeword
fn demo_secret(solver: &Solver) -> Option<Codeword> {
    solver
        .config()
        .parse_codeword(KNUTH_SECRET)
        .ok()
        .or_else(|| solver.universe().last().copied())
}

fn run_demo_command(config: &GameConfig) -> Result<()> {
    let mut solver = build_solver(config)?;
    println!("{}", "Scorer self-test passed".green());

    if let Some(secret) = demo_secret(&solver) {
        let result = solve_secret(&solver, &secret.to_string())?;
        print_solve_result(&result, true);
    }

    // Start the full run from an empty tree
    solver.reset_strategy();
    solver.scorer().reset_comparisons();

    println!("\n{}", "─".repeat(60));
    println!("Playing the game for every possible secret...");
    let secrets = solver.universe().to_vec();
    let stats = run_play_all(&solver, &secrets, false, true)?;
    print_play_all_statistics(&stats);
    Ok(())
}

fn run_solve_command(config: &GameConfig, secret: &str, verbose: bool) -> Result<()> {
    let solver = build_solver(config)?;
    let result = solve_secret(&solver, secret)?;
    print_solve_result(&result, verbose);
    Ok(())
}

fn run_all_command(config: &GameConfig, parallel: bool, limit: Option<usize>) -> Result<()> {
    println!("\n{}", "═".repeat(60));
    println!(" Playing every secret ");
    println!("{}", "═".repeat(60));
    println!(
        "\nAlgorithm: {}, strategy tree {}",
        config.algorithm,
        if config.strategy_cache { "on" } else { "off" }
    );

    let solver = build_solver(config)?;
    let universe = solver.universe();
    let secrets = &universe[..limit.unwrap_or(universe.len()).min(universe.len())];

    let stats = run_play_all(&solver, secrets, parallel, true)?;
    print_play_all_statistics(&stats);
    Ok(())
}

fn run_benchmark_command(config: &GameConfig, parallel: bool) -> Result<()> {
    println!(
        "Running every algorithm over {} secrets...",
        config.universe_size()
    );
    let results = run_benchmark(config, &Algorithm::ALL, parallel)?;
    print_benchmark_results(&results);
    Ok(())
}

fn run_analyze_command(config: &GameConfig, guess: &str, after: &[String]) -> Result<()> {
    let solver = build_solver(config)?;
    let feedback = after
        .iter()
        .map(|text| parse_feedback(&solver, text))
        .collect::<Result<Vec<_>>>()?;

    let result = analyze_guess(&solver, guess, &feedback)?;
    print_analysis_result(&result);
    Ok(())
}

fn run_vectors_command(config: &GameConfig, action: VectorsAction) -> Result<()> {
    match action {
        VectorsAction::Generate {
            output,
            no_reference,
        } => {
            let path = output.unwrap_or_else(|| PathBuf::from(vector_file_name(config)));
            let written = generate_file(config, &path, !no_reference)?;
            println!("Wrote {written} test cases to {}", path.display());
            Ok(())
        }
        VectorsAction::Verify { input } => {
            let path = input.unwrap_or_else(|| PathBuf::from(vector_file_name(config)));
            let scorer = Scorer::new(config);
            let report = verify_file(config, &scorer, &path)?;
            print_verify_report(&report);
            if report.is_success() {
                Ok(())
            } else {
                anyhow::bail!("{} of {} vectors failed", report.failed, report.total)
            }
        }
    }
}

fn run_graph_command(config: &GameConfig, output: Option<PathBuf>) -> Result<()> {
    let solver = build_solver(config)?;
    let secrets = solver.universe().to_vec();
    let stats = run_play_all(&solver, &secrets, true, true)?;
    print_play_all_statistics(&stats);

    let path = output.unwrap_or_else(|| PathBuf::from(strategy_file_name(config)));
    let nodes = export_strategy(&solver, &path)?;
    println!("\nWrote {nodes} strategy nodes to {}", path.display());
    Ok(())
}
