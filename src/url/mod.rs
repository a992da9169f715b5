//! URL handling module for Samesite-Crawler
//!
//! This module provides the pure, stateless URL rules the crawl depends on:
//! deriving the crawl's TLD from the seed, classifying hrefs as absolute or
//! relative, matching hosts against the TLD, and normalizing hrefs into child
//! URLs.
//!
//! "TLD" here is not the public top-level domain. It is the seed's
//! `scheme://[userinfo@]host[:port]`, used both as the same-site boundary and
//! as the base that relative hrefs are joined onto.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{derive_tld, parse_url, raw_authority, raw_host};
pub use matcher::{is_absolute, tld_matches};
pub use normalize::{join_relative, trim_anchor};

/// Turns a raw href found on a page into a child URL, or drops it
///
/// Relative hrefs (per [`is_absolute`]) are assumed same-site and are joined
/// onto the TLD. Absolute hrefs are kept only when their host matches the
/// TLD's host; cross-site links are discarded. Fragments are stripped in both
/// cases.
///
/// # Arguments
///
/// * `tld` - The crawl's TLD (see [`derive_tld`])
/// * `href` - The raw `href` attribute value
///
/// # Returns
///
/// * `Some(String)` - The child URL to record
/// * `None` - The href is cross-site, unparseable, or empty after trimming
///
/// # Examples
///
/// ```
/// use samesite_crawler::url::resolve_child;
///
/// let tld = "http://example.com";
/// assert_eq!(resolve_child(tld, "/about#team"), Some("http://example.com/about".to_string()));
/// assert_eq!(resolve_child(tld, "http://example.com/a"), Some("http://example.com/a".to_string()));
/// assert_eq!(resolve_child(tld, "http://other.com/b"), None);
/// ```
pub fn resolve_child(tld: &str, href: &str) -> Option<String> {
    if !is_absolute(href) {
        return join_relative(tld, href);
    }

    if tld_matches(tld, href) {
        Some(trim_anchor(href).to_string())
    } else {
        None
    }
}
