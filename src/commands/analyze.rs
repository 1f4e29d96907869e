//! Guess analysis command
//!
//! Shows how a guess partitions the candidates, optionally after some feedback.

use crate::core::{Codeword, Score};
use crate::solver::minimax::{evaluate_guess, partition_sizes};
use crate::solver::{SolutionSpace, Solver, Strategy};
use anyhow::{Context, bail};

/// Result of analyzing a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub guess: Codeword,
    pub total_candidates: usize,
    /// Largest partition
    pub worst_case: usize,
    pub is_candidate: bool,
    /// Candidates per score, largest partition first
    pub partitions: Vec<(Score, usize)>,
}

/// Parse feedback written as `guess=EM`, e.g. `1122=10` for one exact, none misplaced
///
/// # Errors
///
/// Returns an error if the guess is not a codeword of the game or the score is not
/// two digits that fit the pin count.
pub fn parse_feedback<S: Strategy>(solver: &Solver<S>, text: &str) -> anyhow::Result<(Codeword, Score)> {
    let (guess, score) = text
        .split_once('=')
        .with_context(|| format!("Feedback '{text}' must look like 1122=10"))?;
    let guess = solver
        .config()
        .parse_codeword(guess)
        .with_context(|| format!("Invalid guess in '{text}'"))?;

    let digits = score
        .trim()
        .chars()
        .map(|ch| ch.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .with_context(|| format!("Score in '{text}' must be hex digits"))?;
    let [exact, misplaced] = digits.as_slice() else {
        bail!("Score in '{text}' must be two digits");
    };
    if exact + misplaced > guess.pin_count() {
        bail!("Score in '{text}' has more pegs than pins");
    }

    Ok((guess, Score::new(*exact, *misplaced)))
}

/// Analyze a guess against the candidates left after `feedback`
///
/// # Errors
///
/// Returns an error if the guess is invalid or the feedback is inconsistent.
pub fn analyze_guess<S: Strategy>(
    solver: &Solver<S>,
    guess: &str,
    feedback: &[(Codeword, Score)],
) -> anyhow::Result<AnalysisResult> {
    let guess = solver
        .config()
        .parse_codeword(guess)
        .with_context(|| format!("Invalid guess '{guess}'"))?;

    let mut space = SolutionSpace::new(solver.universe().to_vec());
    for (played, score) in feedback {
        space = space
            .filter_consistent(solver.scorer(), played, *score)
            .context("No secret matches the feedback given")?;
    }

    let candidates = space.as_slice();
    let eval = evaluate_guess(solver.scorer(), &guess, candidates);
    let mut partitions: Vec<(Score, usize)> = partition_sizes(solver.scorer(), &guess, candidates)
        .into_iter()
        .collect();
    partitions.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    Ok(AnalysisResult {
        guess,
        total_candidates: candidates.len(),
        worst_case: eval.worst_case,
        is_candidate: eval.is_candidate,
        partitions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn solver() -> Solver {
        Solver::from_config(GameConfig::classic()).unwrap()
    }

    #[test]
    fn analyze_opening() {
        let solver = solver();
        let result = analyze_guess(&solver, "1122", &[]).unwrap();

        assert_eq!(result.total_candidates, 1296);
        assert_eq!(result.worst_case, 256);
        assert!(result.is_candidate);
        assert_eq!(result.partitions[0].1, 256);
        assert_eq!(
            result.partitions.iter().map(|(_, n)| n).sum::<usize>(),
            1296
        );
    }

    #[test]
    fn analyze_after_feedback() {
        let solver = solver();
        let feedback = parse_feedback(&solver, "1122=10").unwrap();
        let result = analyze_guess(&solver, "1344", &[feedback]).unwrap();

        assert_eq!(result.total_candidates, 256);
        assert!(result.is_candidate);
        assert!(result.worst_case < 256);
    }

    #[test]
    fn parse_feedback_rejects_bad_input() {
        let solver = solver();
        assert!(parse_feedback(&solver, "1122").is_err());
        assert!(parse_feedback(&solver, "1122=1").is_err());
        assert!(parse_feedback(&solver, "1122=41").is_err());
        assert!(parse_feedback(&solver, "1199=10").is_err());
        assert!(parse_feedback(&solver, "1122=1x0").is_err());
        assert!(parse_feedback(&solver, "1122=1 0").is_err());

        let (guess, score) = parse_feedback(&solver, "1344=02").unwrap();
        assert_eq!(guess.to_string(), "1344");
        assert_eq!(score, Score::new(0, 2));
    }

    #[test]
    fn analyze_invalid_guess() {
        let solver = solver();
        assert!(analyze_guess(&solver, "zzzz", &[]).is_err());
        assert!(analyze_guess(&solver, "112", &[]).is_err());
    }

    #[test]
    fn inconsistent_feedback_is_an_error() {
        let solver = solver();
        let feedback = [(solver.config().parse_codeword("1111").unwrap(), Score::new(3, 1))];
        assert!(analyze_guess(&solver, "1122", &feedback).is_err());
    }
}
