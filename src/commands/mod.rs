//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod graph;
pub mod play_all;
pub mod solve;
pub mod vectors;

pub use analyze::{AnalysisResult, analyze_guess, parse_feedback};
pub use benchmark::{BenchmarkResult, print_benchmark_results, run_benchmark};
pub use graph::export_strategy;
pub use play_all::{PlayAllStatistics, print_play_all_statistics, run_play_all};
pub use solve::{SolveResult, solve_secret};
pub use vectors::{generate_file, vector_file_name, verify_file};
