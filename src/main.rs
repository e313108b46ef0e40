use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber;

mod committers;
mod config;
mod git;
mod output;

use committers::{Aggregator, DomainFilter};
use config::Config;
use git::{discover_repositories, ShortlogCommand};
use output::Reporter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Filesystem roots to scan for Git repositories
    #[arg(default_value = ".")]
    roots: Vec<PathBuf>,

    /// Email domain suffix eligible for the leaderboard (repeatable)
    #[arg(short, long = "domain")]
    domains: Vec<String>,

    /// Number of top committers to report
    #[arg(short, long)]
    top: Option<usize>,

    /// Only count commits authored after this date (YYYY-MM-DD)
    #[arg(long)]
    after: Option<NaiveDate>,

    /// Count merge commits as well
    #[arg(long)]
    include_merges: bool,

    /// Maximum directory depth when discovering repositories
    #[arg(long)]
    max_depth: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long)]
    output: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output_file: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    println!(
        "{}",
        "CommitBoard - Top Committers Across Repositories"
            .bright_cyan()
            .bold()
    );

    let config = Config::load(cli.config.as_deref())?;

    // CLI flags override file/env configuration
    let domains = if cli.domains.is_empty() {
        config.domains.clone()
    } else {
        cli.domains.clone()
    };
    let top_n = cli.top.unwrap_or(config.report.top_n);
    let after = cli.after.or(config.git.after);
    let include_merges = cli.include_merges || config.git.include_merges;
    let max_depth = cli.max_depth.or(config.git.max_depth);
    let format = cli
        .output
        .clone()
        .unwrap_or_else(|| config.report.default_format.clone());

    if !config.report.color_output {
        colored::control::set_override(false);
    }

    if domains.is_empty() {
        warn!("No domain suffixes configured; every shortlog line will be rejected");
    }

    info!("Discovering repositories...");
    let repos = discover_repositories(&cli.roots, max_depth)?;
    info!(
        "Discovered {} repositories under {} roots",
        repos.len(),
        cli.roots.len()
    );

    let shortlog = ShortlogCommand::new(after, include_merges);
    let mut aggregator = Aggregator::new(DomainFilter::new(domains.clone()))?;

    let pb = ProgressBar::new(repos.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} repositories ({eta})",
            )?
            .progress_chars("=>-"),
    );

    for repo in &repos {
        for line in shortlog.lines(repo)? {
            aggregator.consume_line(&line);
        }
        pb.inc(1);
    }
    pb.finish_with_message("Shortlog collection complete");

    let stats = aggregator.stats();
    if stats.lines_seen > 0 && stats.lines_eligible == 0 {
        warn!("No shortlog lines matched the configured domains");
    }
    info!("Ranking {} distinct committers", aggregator.committers());

    let mut ranking = aggregator.into_ranking();
    let rows = ranking.take_top(top_n);

    Reporter::new(&format, cli.output_file.as_deref()).report(&domains, &rows)?;

    println!("\n{}", "Leaderboard complete!".bright_green().bold());

    Ok(())
}
