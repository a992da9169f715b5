//! Shared request rate limiter
//!
//! A single token bucket bounds the request rate across every concurrent
//! fetch of the crawl. It is built once from the configuration before any
//! fetch starts and is never reconfigured.

use crate::config::CrawlerConfig;
use crate::{ConfigError, LimiterError};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token-bucket gate shared by all fetches
///
/// Cloning is cheap and every clone draws from the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<DirectLimiter>,
    requests_per_second: NonZeroU32,
    burst: NonZeroU32,
}

impl RateLimiter {
    /// Creates a limiter allowing `requests_per_second` sustained, with up to
    /// `burst` requests granted back to back
    pub fn new(requests_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second).allow_burst(burst);
        Self {
            inner: Arc::new(governor::RateLimiter::direct(quota)),
            requests_per_second,
            burst,
        }
    }

    /// Creates a limiter from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        let requests_per_second = NonZeroU32::new(config.max_rate).ok_or_else(|| {
            ConfigError::Validation(format!("max_rate must be >= 1, got {}", config.max_rate))
        })?;
        let burst = NonZeroU32::new(config.burst).ok_or_else(|| {
            ConfigError::Validation(format!("burst must be >= 1, got {}", config.burst))
        })?;

        Ok(Self::new(requests_per_second, burst))
    }

    /// Waits until a request may be sent
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A token was granted
    /// * `Err(LimiterError::Cancelled)` - `cancel` fired before a token was
    ///   available, or was already cancelled
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), LimiterError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LimiterError::Cancelled),
            _ = self.inner.until_ready() => Ok(()),
        }
    }

    /// Sustained rate in requests per second
    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second.get()
    }

    /// Burst capacity
    pub fn burst(&self) -> u32 {
        self.burst.get()
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("requests_per_second", &self.requests_per_second)
            .field("burst", &self.burst)
            .finish()
    }
}
