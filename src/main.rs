//! Samesite-Crawler main entry point
//!
//! This is the command-line interface for the same-site crawler.

use anyhow::Context;
use clap::Parser;
use samesite_crawler::config::{load_config, validate, Config};
use samesite_crawler::output::{log_statistics, write_links, CrawlStatistics};
use samesite_crawler::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Samesite-Crawler: map every page reachable from a seed on the same site
///
/// Fetches the seed URL, follows links that stay on the seed's scheme and
/// host, and prints the resulting link graph as JSON.
#[derive(Parser, Debug)]
#[command(name = "samesite-crawler")]
#[command(version)]
#[command(about = "A same-site web crawler", long_about = None)]
struct Cli {
    /// The URL to scrape
    #[arg(long, value_name = "URL")]
    url: String,

    /// The timeout of the individual requests (seconds) [default: 5]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Requests per second [default: 5]
    #[arg(long, value_name = "N")]
    maxrate: Option<u32>,

    /// Rate limiter burst [default: 1]
    #[arg(long, value_name = "N")]
    burst: Option<u32>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the JSON result to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Print the JSON result on a single line
    #[arg(long)]
    compact: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line values on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(timeout) = self.timeout {
            config.crawler.timeout = timeout;
        }
        if let Some(maxrate) = self.maxrate {
            config.crawler.max_rate = maxrate;
        }
        if let Some(burst) = self.burst {
            config.crawler.burst = burst;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if self.compact {
            config.output.pretty = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid settings")?;

    // The seed must parse before anything is fetched
    let mut coordinator = Coordinator::new(&config, &cli.url)
        .with_context(|| format!("Cannot parse TLD from main URL {}", cli.url))?;

    let cancel = coordinator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, failing pending fetches and finishing the crawl");
            cancel.cancel();
        }
    });

    let links = coordinator.run().await;

    log_statistics(&CrawlStatistics::from_links(
        &links,
        coordinator.waves_completed(),
    ));
    write_links(&links, &config.output);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the JSON result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("samesite_crawler=info,warn"),
            1 => EnvFilter::new("samesite_crawler=debug,info"),
            2 => EnvFilter::new("samesite_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
