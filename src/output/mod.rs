//! Output module for crawl results
//!
//! This module handles:
//! - Rendering the result set as JSON wrapped in a `"links"` object
//! - Writing it to stdout or a file, with a compact copy on the debug log
//! - Summarizing the crawl as statistics

pub mod stats;

pub use stats::{log_statistics, CrawlStatistics};

use crate::config::OutputConfig;
use crate::state::Link;
use serde::Serialize;
use std::io::Write;

/// The top-level JSON document
#[derive(Debug, Serialize)]
struct LinksDocument<'a> {
    links: &'a [Link],
}

/// Renders links as `{"links": [...]}`
///
/// # Arguments
///
/// * `links` - The crawl result
/// * `pretty` - Indent the output
pub fn render_links(links: &[Link], pretty: bool) -> Result<String, serde_json::Error> {
    let document = LinksDocument { links };
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}

/// Writes the crawl result to its destination
///
/// The rendered document goes to the configured file, or stdout when no path
/// is set. An unformatted copy is always sent to the debug log. Failures are
/// logged and otherwise ignored; the crawl result itself is unaffected.
pub fn write_links(links: &[Link], config: &OutputConfig) {
    match render_links(links, config.pretty) {
        Ok(rendered) => {
            if let Err(e) = write_document(&rendered, config) {
                tracing::warn!("Cannot write crawl result: {}", e);
            }
        }
        Err(e) => tracing::warn!("Cannot encode to JSON: {}", e),
    }

    match render_links(links, false) {
        Ok(compact) => tracing::debug!("{}", compact),
        Err(e) => tracing::warn!("Cannot encode to JSON: {}", e),
    }
}

fn write_document(rendered: &str, config: &OutputConfig) -> crate::Result<()> {
    match &config.path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            tracing::info!("Crawl result written to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
