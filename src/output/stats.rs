//! Statistics summarizing a finished crawl

use crate::state::Link;
use std::collections::HashSet;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of pages in the result
    pub total_pages: usize,

    /// Pages whose fetch errored
    pub errored_pages: usize,

    /// Child references across all pages, duplicates included
    pub total_child_links: usize,

    /// Distinct child URLs
    pub unique_child_urls: usize,

    /// Waves run after the seed fetch
    pub waves: usize,
}

impl CrawlStatistics {
    /// Computes statistics from a crawl result
    pub fn from_links(links: &[Link], waves: usize) -> Self {
        let unique_child_urls = links
            .iter()
            .flat_map(|link| link.child_urls.iter())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_pages: links.len(),
            errored_pages: links.iter().filter(|link| link.errored).count(),
            total_child_links: links.iter().map(|link| link.child_urls.len()).sum(),
            unique_child_urls,
            waves,
        }
    }

    /// Share of pages that errored, as a percentage
    pub fn error_rate(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.errored_pages as f64 / self.total_pages as f64) * 100.0
        }
    }
}

/// Logs statistics at info level
///
/// Stdout carries the JSON result, so the summary goes to the log instead.
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Pages: {}, errored: {} ({:.1}%), child links: {} ({} unique), waves: {}",
        stats.total_pages,
        stats.errored_pages,
        stats.error_rate(),
        stats.total_child_links,
        stats.unique_child_urls,
        stats.waves
    );
}
