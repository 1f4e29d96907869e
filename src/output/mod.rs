//! Terminal output formatting
//!
//! Display utilities for CLI results, pretty-printing and the strategy graph.

pub mod display;
pub mod formatters;
pub mod graphviz;

pub use display::{print_analysis_result, print_solve_result, print_verify_report};
