//! Secret solving command
//!
//! Solves a specific secret and returns the game played along with its cost.

use crate::solver::{GameRecord, SolveError, Solver, Strategy};
use std::time::{Duration, Instant};

/// Result of solving one secret
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub record: GameRecord,
    /// Codeword comparisons spent on this game
    pub comparisons: u64,
    pub duration: Duration,
}

/// Solve a secret given as text, e.g. `"3632"`
///
/// # Errors
///
/// Returns an error if:
/// - The secret is not a codeword of the solver's game
/// - The solver fails to finish the game
pub fn solve_secret<S: Strategy>(solver: &Solver<S>, secret: &str) -> Result<SolveResult, SolveError> {
    let secret = solver.config().parse_codeword(secret)?;

    let comparisons_before = solver.scorer().comparisons();
    let start = Instant::now();
    let record = solver.solve(&secret)?;
    let duration = start.elapsed();

    Ok(SolveResult {
        record,
        comparisons: solver.scorer().comparisons() - comparisons_before,
        duration,
    })
}
