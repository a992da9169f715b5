//! Configuration module for Samesite-Crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are applied on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use samesite_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Requests per second: {}", config.crawler.max_rate);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BURST, DEFAULT_MAX_RATE,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
