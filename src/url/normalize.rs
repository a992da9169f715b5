/// Strips the fragment anchor from an href
///
/// Everything from the first `#` on is removed. Hrefs without a `#` are
/// returned unchanged, so applying this twice is the same as applying it once.
///
/// # Examples
///
/// ```
/// use samesite_crawler::url::trim_anchor;
///
/// assert_eq!(trim_anchor("http://x/y#frag"), "http://x/y");
/// assert_eq!(trim_anchor("http://x/y"), "http://x/y");
/// ```
pub fn trim_anchor(href: &str) -> &str {
    match href.find('#') {
        Some(index) => &href[..index],
        None => href,
    }
}

/// Joins a relative href onto the TLD
///
/// Leading and trailing slashes are trimmed from both sides and the two are
/// joined with a single `/`; the fragment is then stripped. No other
/// normalization (dot segments, percent-encoding, case) is applied.
///
/// # Returns
///
/// * `Some(String)` - The joined URL
/// * `None` - The href is empty once slashes are trimmed
pub fn join_relative(tld: &str, href: &str) -> Option<String> {
    let path = href.trim_matches('/');
    if path.is_empty() {
        return None;
    }

    let joined = format!("{}/{}", tld.trim_matches('/'), path);
    Some(trim_anchor(&joined).to_string())
}
