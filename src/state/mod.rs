//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Link`: the record produced for each fetched URL
//! - `LinkSet`: the ordered, append-only accumulator of every `Link` produced
//!   so far; the crawl frontier is derived from it

mod link;
mod link_set;

// Re-export main types
pub use link::Link;
pub use link_set::LinkSet;
