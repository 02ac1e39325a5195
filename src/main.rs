//! rustcolleagues - find a researcher's co-authors in a region
//!
//! ## Usage
//!
//! ```bash
//! rustcolleagues --author_name "Jane Doe"
//! rustcolleagues --author_name "Jane Doe" --institution "university of tokyo" --output japan.csv
//! ```
//!
//! `SERPAPI_KEY` is read from the environment or a `.env` file.

use anyhow::{Context, Result};
use clap::Parser;
use rustcolleagues::{config::Settings, filter::RegionFilter, pipeline::Pipeline, profile::Lookup};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Find Google Scholar co-authors affiliated with a region's institutions
#[derive(Parser)]
#[command(name = "rustcolleagues")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Name of the author to search for
    #[arg(long = "author_name")]
    author_name: String,

    /// CSV file rows are appended to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Institution substring to match (repeatable, replaces the configured list)
    #[arg(long = "institution")]
    institutions: Vec<String>,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    proxy: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let settings = apply_cli(Settings::from_env(), &cli);
    debug!(
        scholar = %settings.scholar_base_url,
        serpapi = %settings.serpapi_base_url,
        region = %settings.region_name,
        institutions = settings.region.institutions().len(),
        output = ?settings.output_path,
        "Loaded settings"
    );

    let pipeline = Pipeline::new(settings).context("Invalid configuration")?;
    let report = pipeline
        .run(&cli.author_name)
        .await
        .context("Co-author search failed")?;

    if let Lookup::Missing(reason) = &report.lookup {
        debug!(reason = %reason, "Author lookup missed");
    }

    println!(
        "Found {} connections in {}",
        report.connections.len(),
        pipeline.settings().region_name
    );
    if report.rows_written > 0 {
        println!("Saved: {:?}", pipeline.settings().output_path);
    }

    Ok(())
}

/// Apply CLI overrides on top of environment settings
fn apply_cli(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(output) = &cli.output {
        settings.output_path = output.clone();
    }
    if !cli.institutions.is_empty() {
        settings.region = RegionFilter::new(&cli.institutions);
    }
    if cli.proxy.is_some() {
        settings.proxy = cli.proxy.clone();
    }
    settings
}
