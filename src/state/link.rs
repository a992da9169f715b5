//! Link record definitions
//!
//! A `Link` is created by one fetch, populated in one shot and never mutated
//! once it reaches the accumulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of fetching one URL
///
/// Field names are serialized as `SelfURL`, `Visited`, `Errored` and
/// `ChildURLs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The URL this record describes
    #[serde(rename = "SelfURL")]
    pub self_url: String,

    /// True once a fetch attempt has completed, successful or not
    #[serde(rename = "Visited")]
    pub visited: bool,

    /// True if the request, rate-limit wait, transport, status or body failed
    #[serde(rename = "Errored")]
    pub errored: bool,

    /// Same-site child URLs in document order, duplicates preserved
    #[serde(rename = "ChildURLs")]
    pub child_urls: Vec<String>,
}

impl Link {
    /// Creates an unvisited link with no children
    pub fn new(self_url: impl Into<String>) -> Self {
        Self {
            self_url: self_url.into(),
            visited: false,
            errored: false,
            child_urls: Vec::new(),
        }
    }

    /// Creates a visited, errored link with no children
    ///
    /// This is the record emitted when a fetch fails before any document
    /// could be read.
    pub fn failed(self_url: impl Into<String>) -> Self {
        Self {
            self_url: self_url.into(),
            visited: true,
            errored: true,
            child_urls: Vec::new(),
        }
    }

    /// Marks the fetch attempt as complete
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Marks the fetch attempt as failed
    pub fn mark_errored(&mut self) {
        self.visited = true;
        self.errored = true;
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link: {}, visited: {}, errored: {}, child URLs: {:?}",
            self.self_url, self.visited, self.errored, self.child_urls
        )
    }
}
