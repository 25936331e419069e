// Colored terminal output for moderation decisions and batch runs.
//
// main.rs delegates all human-readable display here; JSON output is built
// directly from the serializable types.

use colored::{ColoredString, Colorize};

use crate::moderation::{DecisionSource, IntakeError, ModerationDecision};
use crate::pipeline::batch::{BatchItem, BatchSummary};

const PREVIEW_CHARS: usize = 60;

/// Display the verdict for a single comment.
pub fn display_decision(text: &str, decision: &ModerationDecision) {
    let verdict = if decision.blocked {
        "BLOCK".red().bold()
    } else {
        "ALLOW".green().bold()
    };

    let matched = match &decision.matched {
        Some(term) => format!("  matched {}", format!("{term:?}").yellow()),
        None => String::new(),
    };

    println!(
        "  {}  {:<28} {}{}",
        verdict,
        colorize_source(decision.source),
        super::truncate_chars(text, PREVIEW_CHARS).dimmed(),
        matched,
    );
}

/// Display every rejected comment of a batch, then the totals.
pub fn display_batch(items: &[BatchItem], summary: &BatchSummary) {
    println!(
        "\n{}",
        format!("=== Batch review ({} comments) ===", summary.total).bold()
    );

    let rejected: Vec<&BatchItem> = items.iter().filter(|i| !i.accepted()).collect();
    if rejected.is_empty() {
        println!("\n  All comments accepted.");
    } else {
        println!();
        println!(
            "  {:>5}  {:<40} {}",
            "Line".dimmed(),
            "Reason".dimmed(),
            "Comment".dimmed()
        );
        println!("  {}", "-".repeat(78).dimmed());
        for item in rejected {
            if let Err(e) = &item.outcome {
                println!(
                    "  {:>5}  {:<40} {}",
                    item.index + 1,
                    colorize_rejection(e),
                    super::truncate_chars(&item.text, 40).dimmed()
                );
            }
        }
    }

    println!();
    println!("  {} {} accepted", "+".green(), summary.accepted);
    if summary.offensive > 0 {
        println!("  {} {} offensive", "!!".red().bold(), summary.offensive);
    }
    if summary.too_long > 0 {
        println!("  {} {} too long", "~".yellow(), summary.too_long);
    }
    if summary.empty > 0 {
        println!("  {} {} empty", "~".yellow(), summary.empty);
    }
}

/// Color a decision source by how much trust its verdict deserves.
pub fn colorize_source(source: DecisionSource) -> ColoredString {
    match source {
        DecisionSource::Remote => source.as_str().cyan(),
        DecisionSource::Lexical => source.as_str().normal(),
        DecisionSource::RemoteFallbackHeuristic => source.as_str().yellow(),
        DecisionSource::FailOpen => source.as_str().bright_red(),
    }
}

fn colorize_rejection(error: &IntakeError) -> ColoredString {
    match error {
        IntakeError::Offensive { decided_by } => format!("offensive ({decided_by})").red(),
        other => other.to_string().yellow(),
    }
}
