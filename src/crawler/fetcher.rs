//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the identifying user agent
//! - One rate-limited, timeout-bounded GET per URL
//! - Turning the response into exactly one `Link`, whatever failed

use crate::config::UserAgentConfig;
use crate::crawler::limiter::RateLimiter;
use crate::crawler::parser::extract_child_urls;
use crate::state::Link;
use crate::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy. The per-request
/// timeout is applied on each request rather than on the client.
///
/// # Example
///
/// ```no_run
/// use samesite_crawler::config::UserAgentConfig;
/// use samesite_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// A fetched response before link extraction
struct FetchedPage {
    status: StatusCode,
    body: String,
}

/// Fetches single URLs on behalf of the crawl
///
/// A `Fetcher` is shared by every task of a wave. It carries everything a
/// fetch needs: the client, the shared rate limiter, the crawl's TLD and the
/// per-request timeout.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    limiter: RateLimiter,
    tld: String,
    timeout: Duration,
    cancel: CancellationToken,
}

impl Fetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `limiter` - The rate limiter shared by all fetches
    /// * `tld` - The crawl's TLD
    /// * `timeout` - Per-request timeout
    pub fn new(
        client: Client,
        limiter: RateLimiter,
        tld: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            limiter,
            tld: tld.into(),
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the token that cancels rate-limiter waits
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The crawl's TLD
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// The token that cancels pending rate-limiter waits
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetches one URL and returns its `Link`
    ///
    /// # Failure handling
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Request cannot be built | errored, no children |
    /// | Rate limiter wait cancelled | errored, no children |
    /// | Transport error (DNS, connect, timeout) | errored, no children |
    /// | Body cannot be read | errored, no children |
    /// | Status other than 200 | errored, children still extracted |
    ///
    /// No retries are made. The returned link is always visited.
    pub async fn fetch(&self, url: &str) -> Link {
        let mut link = Link::new(url);

        let page = match self.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("{}", e);
                link.mark_errored();
                return link;
            }
        };

        if page.status != StatusCode::OK {
            let e = FetchError::Status {
                url: url.to_string(),
                status: page.status.as_u16(),
            };
            tracing::debug!("{}", e);
            link.mark_errored();
        }

        link.child_urls = extract_child_urls(&self.tld, &page.body);
        link.mark_visited();
        link
    }

    /// Builds, rate-limits and sends the request, then reads the body
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let request = self
            .client
            .get(url)
            .timeout(self.timeout)
            .build()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        self.limiter
            .wait(&self.cancel)
            .await
            .map_err(|source| FetchError::RateLimit {
                url: url.to_string(),
                source,
            })?;

        tracing::info!("Fetching {}", url);
        let response =
            self.client
                .execute(request)
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage { status, body })
    }
}
