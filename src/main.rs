use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

use commentgate::config::Config;
use commentgate::lexical::Blacklist;
use commentgate::moderation::{ModerationDecision, Moderator};
use commentgate::output::terminal;
use commentgate::pipeline::batch::{self, BatchSummary};

/// commentgate: decide whether a comment should be blocked.
///
/// Asks a text-generation endpoint when one is configured and falls back to
/// an accent- and leetspeak-aware blacklist when it can't answer.
#[derive(Parser)]
#[command(name = "commentgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moderate one or more comments given on the command line
    Check {
        /// Comment text (quote it); each argument is moderated separately
        #[arg(required = true)]
        texts: Vec<String>,

        /// Print decisions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run comments through intake, one per line, from a file or stdin
    Batch {
        /// Read comments from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Number of comments reviewed in parallel (default: 8)
        #[arg(long, default_value_t = batch::DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Print the summary and rejections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and whether it is valid
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("commentgate=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { texts, json } => {
            let config = Config::load()?;
            let moderator = build_moderator(&config)?;

            let mut reports = Vec::with_capacity(texts.len());
            for text in &texts {
                let decision = moderator.should_block(text).await;
                reports.push(DecisionReport::new(text, decision));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                println!();
                for report in &reports {
                    terminal::display_decision(report.text, &report.decision);
                }
                let blocked = reports.iter().filter(|r| r.decision.blocked).count();
                if blocked > 0 {
                    println!("\n  {} of {} blocked", blocked, reports.len());
                }
            }
        }

        Commands::Batch {
            file,
            concurrency,
            json,
        } => {
            let config = Config::load()?;
            let moderator = build_moderator(&config)?;
            let policy = config.comment_policy();

            let input = read_input(file.as_ref()).await?;
            let comments = batch::comments_from_lines(&input);
            if comments.is_empty() {
                println!("No comments to review.");
                return Ok(());
            }

            info!(
                comments = comments.len(),
                concurrency, "Starting batch review"
            );

            let pb = if json {
                ProgressBar::hidden()
            } else {
                let pb = ProgressBar::new(comments.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("  Reviewing [{bar:30}] {pos}/{len} ({eta})")
                        .context("Invalid progress bar template")?,
                );
                pb
            };

            let items =
                batch::review_batch(&moderator, &policy, comments, concurrency, &pb).await;
            pb.finish_and_clear();

            let summary = BatchSummary::from_items(&items);
            if json {
                let rejections: Vec<RejectionReport> = items
                    .iter()
                    .filter_map(|item| {
                        item.outcome.as_ref().err().map(|e| RejectionReport {
                            line: item.index + 1,
                            text: &item.text,
                            reason: e.to_string(),
                        })
                    })
                    .collect();
                let report = serde_json::json!({
                    "summary": summary,
                    "rejected": rejections,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_batch(&items, &summary);
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let blacklist = match Blacklist::load(config.blacklist_file.as_deref()) {
                Ok(list) => Some(list),
                Err(e) => {
                    println!("{} {e:#}", "Warning:".yellow());
                    None
                }
            };
            commentgate::status::show(&config, blacklist.as_ref());
        }
    }

    Ok(())
}

/// Validate configuration, load the blacklist and build the moderator.
fn build_moderator(config: &Config) -> Result<Moderator> {
    config.validate()?;
    let blacklist = Arc::new(Blacklist::load(config.blacklist_file.as_deref())?);
    Moderator::new(&config.moderation, blacklist)
}

/// Read the whole batch input from a file, or stdin when no file is given.
async fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read comments from {}", path.display())),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("Failed to read comments from stdin")?;
            Ok(input)
        }
    }
}

#[derive(Serialize)]
struct DecisionReport<'a> {
    text: &'a str,
    #[serde(flatten)]
    decision: ModerationDecision,
}

impl<'a> DecisionReport<'a> {
    fn new(text: &'a str, decision: ModerationDecision) -> Self {
        Self { text, decision }
    }
}

#[derive(Serialize)]
struct RejectionReport<'a> {
    line: usize,
    text: &'a str,
    reason: String,
}

