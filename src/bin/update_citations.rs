//! Refresh publication citation counts in the data module.
//!
//! Fetches each registered publication's citation page one at a time and
//! rewrites the data file once if any count changed.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use portfolio::citations::short_title;
use portfolio::config::Config;
use portfolio::{logging, CitationUpdater, Outcome};

#[derive(Parser, Debug)]
#[command(name = "update-citations", version, about = "Update publication citation counts")]
struct Cli {
    /// Config file (default: ./portfolio.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data module to update, overriding the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Report changes without writing the data file
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }

    info!("Starting citation update...");
    let updater = CitationUpdater::from_config(&config).context("Failed to build HTTP client")?;
    let report = updater
        .update_file(&config.data_file, cli.dry_run)
        .await
        .with_context(|| format!("Citation update failed for {}", config.data_file.display()))?;

    for entry in &report.outcomes {
        let status = match entry.outcome {
            Outcome::Updated { from, to } => format!("updated {} -> {}", from, to),
            Outcome::Unchanged(n) => format!("unchanged ({})", n),
            Outcome::Skipped => "skipped (no source URL)".to_string(),
            Outcome::Unknown { kept } => format!("unknown (kept {})", kept),
        };
        info!("  {}: {}", short_title(&entry.title, 50), status);
    }
    info!(
        "Done at {}: {} updated, file {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.updated_count(),
        if report.written { "written" } else { "unchanged" }
    );

    Ok(())
}
