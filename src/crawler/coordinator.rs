//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl runs in synchronized waves:
//! - Seeding: fetch the seed URL and record its `Link`
//! - Wave: every child URL not yet recorded is fetched concurrently, one task
//!   per URL, and the wave waits for all of them before recording results
//! - Done: a wave (or the seed) leaves no unrecorded child URL
//!
//! Errored pages are recorded like any other, so they are never re-queued.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::limiter::RateLimiter;
use crate::state::{Link, LinkSet};
use crate::url::derive_tld;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Main crawler coordinator structure
pub struct Coordinator {
    seed: String,
    fetcher: Arc<Fetcher>,
    waves: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Derives the TLD from the seed and builds the HTTP client and rate
    /// limiter from the configuration. Nothing is fetched yet.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The URL the crawl starts from
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The seed does not parse or the client failed to build
    pub fn new(config: &Config, seed: &str) -> crate::Result<Self> {
        let tld = derive_tld(seed)?;
        let client = build_http_client(&config.user_agent)?;
        let limiter = RateLimiter::from_config(&config.crawler)?;

        tracing::info!(
            "Crawling {} within {} ({} req/s, burst {}, timeout {}s)",
            seed,
            tld,
            limiter.requests_per_second(),
            limiter.burst(),
            config.crawler.timeout
        );

        let fetcher = Fetcher::new(client, limiter, tld, config.crawler.request_timeout());
        Ok(Self::with_fetcher(seed, fetcher))
    }

    /// Creates a coordinator around an already-built fetcher
    pub fn with_fetcher(seed: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            seed: seed.into(),
            fetcher: Arc::new(fetcher),
            waves: 0,
        }
    }

    /// The crawl's TLD
    pub fn tld(&self) -> &str {
        self.fetcher.tld()
    }

    /// The token that fails pending rate-limiter waits when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.fetcher.cancellation_token().clone()
    }

    /// Number of waves completed by the last `run`, not counting the seed fetch
    pub fn waves_completed(&self) -> usize {
        self.waves
    }

    /// Runs the crawl to its fixed point
    ///
    /// # Returns
    ///
    /// Every `Link` produced, seed first, then each wave's results in
    /// dispatch order. Each URL appears exactly once.
    pub async fn run(&mut self) -> Vec<Link> {
        let start_time = Instant::now();
        let mut links = LinkSet::new();
        self.waves = 0;

        let seed_link = self.fetcher.fetch(&self.seed).await;
        tracing::debug!("{}", seed_link);
        links.insert(seed_link);

        loop {
            let pending = links.pending_children();
            if pending.is_empty() {
                tracing::info!("No new URLs discovered, crawl complete");
                break;
            }

            self.waves += 1;
            tracing::info!(
                "Wave {}: fetching {} new URLs ({} known)",
                self.waves,
                pending.len(),
                links.len()
            );
            for url in &pending {
                tracing::trace!("Queued {}", url);
            }

            for link in self.run_wave(pending).await {
                tracing::debug!("{}", link);
                links.insert(link);
            }
        }

        tracing::info!(
            "Crawl completed: {} pages in {} waves, {:?}",
            links.len(),
            self.waves,
            start_time.elapsed()
        );

        links.into_vec()
    }

    /// Fetches every URL concurrently and waits for all of them
    ///
    /// Results come back in the order of `urls`. A task that panics is
    /// recorded as an errored link for its URL.
    async fn run_wave(&self, urls: Vec<String>) -> Vec<Link> {
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let url = url.clone();
                tokio::spawn(async move { fetcher.fetch(&url).await })
            })
            .collect();

        let results = join_all(handles).await;

        urls.into_iter()
            .zip(results)
            .map(|(url, result)| match result {
                Ok(link) => link,
                Err(e) => {
                    tracing::error!("Fetch task for {} failed: {}", url, e);
                    Link::failed(url)
                }
            })
            .collect()
    }
}

/// Runs a complete crawl operation
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL the crawl starts from
///
/// # Returns
///
/// * `Ok(Vec<Link>)` - Every page reached from the seed
/// * `Err(CrawlError)` - The crawl could not be set up
pub async fn run_crawl(config: &Config, seed: &str) -> crate::Result<Vec<Link>> {
    let mut coordinator = Coordinator::new(config, seed)?;
    Ok(coordinator.run().await)
}
