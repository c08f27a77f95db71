mod classifier;
mod data_loader;
mod decide;
mod error;
mod graph;
mod pipeline;
mod ranking;
mod ranking_context;
mod report;
mod team;
mod trainer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ranking_context::RankingContext;

/// Ranks teams from a season of game results and scores its bowl matchups.
///
/// With a single results file, bowls are decided by combined-score margin.
/// With a directory of per-year files, every season but the latest trains a
/// classifier that then scores the latest season's bowls.
#[derive(Parser, Debug)]
#[command(name = "bowlcast", version, about)]
struct Cli {
    /// Season results: one CSV file, or a directory of <year>.csv files
    results: PathBuf,

    /// Output file for the bowl decision report
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = RankingContext::default();

    if cli.results.is_dir() {
        pipeline::run_season_directory(&cli.results, &cli.out, &ctx)
            .with_context(|| format!("processing season directory {}", cli.results.display()))?;
    } else {
        pipeline::run_single_season(&cli.results, &cli.out, &ctx)
            .with_context(|| format!("processing season file {}", cli.results.display()))?;
    }

    Ok(())
}
