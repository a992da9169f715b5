//! The crawl's result accumulator and the frontier derived from it

use super::Link;
use std::collections::HashSet;

/// Ordered, append-only accumulator of crawl results
///
/// Links are kept in the order they were produced. An index of `self_url`s
/// backs the "already present" checks so the frontier can be recomputed
/// without scanning every link for every child.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: Vec<Link>,
    index: HashSet<String>,
}

impl LinkSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a link unless one with the same URL is already present
    ///
    /// # Returns
    ///
    /// * `true` - The link was appended
    /// * `false` - A link with the same `self_url` exists; the new one is dropped
    pub fn insert(&mut self, link: Link) -> bool {
        if !self.index.insert(link.self_url.clone()) {
            tracing::warn!("Duplicate result for {}, keeping the first", link.self_url);
            return false;
        }
        self.links.push(link);
        true
    }

    /// Returns true if a link for this exact URL string is present
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    /// Returns the current frontier
    ///
    /// Every child URL of every link, in link order then document order, for
    /// which no link is present yet. Each URL appears once.
    pub fn pending_children(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.links
            .iter()
            .flat_map(|link| link.child_urls.iter())
            .filter(|child| !self.contains(child))
            .filter(|child| seen.insert(child.as_str()))
            .cloned()
            .collect()
    }

    /// Number of links in the set
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the set holds no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over the links in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Borrows the links in insertion order
    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    /// Consumes the set, returning the links in insertion order
    pub fn into_vec(self) -> Vec<Link> {
        self.links
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
