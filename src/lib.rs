//! Samesite-Crawler: a same-site web crawler
//!
//! This crate fetches a seed page, keeps only the links that stay on the seed's
//! scheme and host, and keeps fetching newly discovered links in rate-limited
//! concurrent waves until no unknown link remains. The result is the graph of
//! visited pages and their outgoing same-site links.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl setup
///
/// Only setup failures surface here. Failures of individual fetches are
/// recorded on the resulting [`Link`] instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Errors local to a single fetch
///
/// None of these stop the crawl; the fetcher logs them and marks the page
/// as errored.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build request for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Rate limiter refused {url}: {source}")]
    RateLimit { url: String, source: LimiterError },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Rate limiter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimiterError {
    #[error("wait cancelled")]
    Cancelled,
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use state::{Link, LinkSet};
pub use crate::url::{derive_tld, is_absolute, tld_matches, trim_anchor};
