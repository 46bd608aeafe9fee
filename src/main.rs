//! Web-Wanderer main entry point
//!
//! This is the command-line interface for the Web-Wanderer site downloader.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use web_wanderer::config::{load_config, Config};
use web_wanderer::url::{normalize, storage_file_name};
use web_wanderer::{Coordinator, CrawlOptions, HttpFetcher};

/// Web-Wanderer: a breadth-first site downloader
///
/// Web-Wanderer fetches every page reachable from a seed URL within the
/// seed's URL prefix, stores the HTML on disk, and writes a JSON manifest
/// of which URLs succeeded or failed.
#[derive(Parser, Debug)]
#[command(name = "web-wanderer")]
#[command(version)]
#[command(about = "A breadth-first site downloader", long_about = None)]
struct Cli {
    /// Seed URL the crawl starts from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent worker tasks
    #[arg(short, long)]
    workers: Option<usize>,

    /// Per-page fetch timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Root directory crawl output is written under
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration if given; CLI flags override file settings.
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let crawler = config
        .crawler
        .with_overrides(cli.workers, cli.timeout_ms, cli.output_dir);
    let output_root = PathBuf::from(&crawler.output_dir);

    // Each crawl gets its own directory under the output root, named
    // after the seed's authority.
    let seed = normalize(&cli.seed)?;
    let crawl_dir = output_root.join(storage_file_name(&seed.authority_root(), true));
    tokio::fs::create_dir_all(&crawl_dir).await?;

    let options = CrawlOptions {
        workers: crawler.workers,
        fetch_timeout: Duration::from_millis(crawler.fetch_timeout_ms),
        output_dir: crawl_dir,
    };

    let fetcher = Arc::new(HttpFetcher::new()?);
    let coordinator = Coordinator::new(seed.as_str(), options, fetcher)?;
    let report = coordinator.run().await?;

    if !cli.quiet {
        println!(
            "Crawled {} pages ({} failed) in {:.1}s",
            report.success_count(),
            report.failure_count(),
            report.elapsed.as_secs_f64()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_wanderer=info,warn"),
            1 => EnvFilter::new("web_wanderer=debug,info"),
            2 => EnvFilter::new("web_wanderer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
