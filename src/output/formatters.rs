//! Formatting utilities for terminal output

use crate::core::Score;

/// Format a score as key pegs: `●` exact, `○` misplaced, `·` empty
#[must_use]
pub fn score_to_pegs(score: Score, pin_count: u8) -> String {
    let exact = usize::from(score.exact());
    let misplaced = usize::from(score.misplaced());
    let empty = usize::from(pin_count).saturating_sub(exact + misplaced);

    format!("{}{}{}", "●".repeat(exact), "○".repeat(misplaced), "·".repeat(empty))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
