//! Display functions for command results

use super::formatters::{create_progress_bar, score_to_pegs};
use crate::commands::{AnalysisResult, SolveResult};
use crate::vectors::VerifyReport;
use colored::Colorize;

/// Print the result of solving a secret
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    let record = &result.record;
    let pin_count = record.secret.pin_count();

    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        record.secret.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in record.moves.iter().enumerate() {
        let turn = i + 1;
        let source = if step.from_cache { " (cached)" } else { "" };
        println!(
            "\nTurn {turn}: {} {} {}{}",
            step.guess,
            score_to_pegs(step.score, pin_count),
            step.score.to_string().bright_black(),
            source.bright_black()
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.remaining_before, step.remaining_after
            );
        }
    }

    println!();
    println!(
        "{}",
        format!("✅ Solved in {} guesses!", record.turns())
            .green()
            .bold()
    );
    println!("Codeword comparisons: {}", result.comparisons);
    println!("Elapsed time: {:.4}ms", result.duration.as_secs_f64() * 1000.0);
}

/// Print the result of guess analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "MINIMAX ANALYSIS:".bright_cyan().bold(),
        result.guess.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 Against {} possible secrets:", result.total_candidates);
    println!(
        "   Worst case:  {} candidates remain",
        result.worst_case.to_string().bright_yellow()
    );
    println!(
        "   Candidate:   {}",
        if result.is_candidate { "yes".green() } else { "no".red() }
    );
    println!("   Partitions:  {}", result.partitions.len());

    let pin_count = result.guess.pin_count();
    let largest = result.worst_case as f64;
    println!();
    for (score, count) in &result.partitions {
        let bar = create_progress_bar(*count as f64, largest, 30);
        println!(
            "   {} {}  [{}] {count}",
            score,
            score_to_pegs(*score, pin_count),
            bar.green()
        );
    }
}

/// Print the outcome of a vector verification run
pub fn print_verify_report(report: &VerifyReport) {
    println!("Done running {} test cases.\n", report.total);
    let summary = report.to_string();
    if report.is_success() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}
