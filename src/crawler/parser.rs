//! HTML parser for extracting links
//!
//! Every `<a>` element carrying an `href` attribute is considered, in
//! document order. Raw href values are classified and normalized by
//! [`crate::url::resolve_child`].

use crate::url::resolve_child;
use scraper::{Html, Selector};

/// Extracts the raw `href` value of every anchor in the document
///
/// Values are returned as written, in document order, including duplicates
/// and empty strings.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Extracts the same-site child URLs of a page
///
/// # Arguments
///
/// * `tld` - The crawl's TLD, used to join relative hrefs and to filter
///   absolute ones
/// * `html` - The page body
///
/// # Returns
///
/// Child URLs in document order; duplicates preserved, cross-site links and
/// empty hrefs dropped
///
/// # Example
///
/// ```
/// use samesite_crawler::crawler::extract_child_urls;
///
/// let html = r#"<a href="/a">A</a><a href="http://other.com/b">B</a>"#;
/// let children = extract_child_urls("http://example.com", html);
/// assert_eq!(children, vec!["http://example.com/a"]);
/// ```
pub fn extract_child_urls(tld: &str, html: &str) -> Vec<String> {
    extract_hrefs(html)
        .iter()
        .filter_map(|href| resolve_child(tld, href))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TLD: &str = "https://example.com";

    #[test]
    fn test_extract_hrefs_in_document_order() {
        let html = r#"
            <html>
            <head><a href="/head-link">H</a></head>
            <body>
                <a href="/page1">Link 1</a>
                <nav><a href="https://other.com/page3">Link 3</a></nav>
                <a href="/page2">Link 2</a>
            </body>
            </html>
        "#;
        assert_eq!(
            extract_hrefs(html),
            vec!["/head-link", "/page1", "https://other.com/page3", "/page2"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Top</a><a href="">Empty</a></body></html>"#;
        assert_eq!(extract_hrefs(html), vec![""]);
    }

    #[test]
    fn test_non_anchor_links_ignored() {
        let html = r#"
            <html><head>
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head><body><img src="/logo.png"></body></html>
        "#;
        assert!(extract_hrefs(html).is_empty());
    }

    #[test]
    fn test_extract_child_urls_filters_and_resolves() {
        let html = r#"
            <html><body>
                <a href="/docs">Docs</a>
                <a href="https://example.com/blog#latest">Blog</a>
                <a href="https://other.com/page">Other</a>
                <a href="/">Home</a>
            </body></html>
        "#;
        assert_eq!(
            extract_child_urls(TLD, html),
            vec!["https://example.com/docs", "https://example.com/blog"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        let html = r#"<a href="/a">1</a><a href="/a#x">2</a><a href="a/">3</a>"#;
        assert_eq!(
            extract_child_urls(TLD, html),
            vec![
                "https://example.com/a",
                "https://example.com/a",
                "https://example.com/a"
            ]
        );
    }

    #[test]
    fn test_garbage_body_yields_no_children() {
        assert!(extract_child_urls(TLD, "\u{fffd}\u{fffd} not html <<<").is_empty());
        assert!(extract_child_urls(TLD, "").is_empty());
    }
}
