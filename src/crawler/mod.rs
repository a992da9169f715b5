//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - A shared token-bucket rate limiter
//! - HTTP fetching of single URLs into `Link` records
//! - HTML parsing and same-site link extraction
//! - Wave-based crawl coordination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, Fetcher};
pub use limiter::RateLimiter;
pub use parser::{extract_child_urls, extract_hrefs};

use crate::config::Config;
use crate::state::Link;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Derive the TLD from the seed URL
/// 2. Build the HTTP client and rate limiter
/// 3. Fetch the seed
/// 4. Fetch newly discovered same-site URLs in waves until none remain
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL the crawl starts from
///
/// # Returns
///
/// * `Ok(Vec<Link>)` - One link per visited URL
/// * `Err(CrawlError)` - The seed is invalid or setup failed
pub async fn crawl(config: &Config, seed: &str) -> crate::Result<Vec<Link>> {
    run_crawl(config, seed).await
}
