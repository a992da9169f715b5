use super::domain::raw_host;
use url::Url;

/// Checks whether an href is an absolute URL
///
/// This is a syntactic heuristic, not URI grammar: the href is absolute when
/// it contains `://` and that separator comes before the first `.`. An href
/// with no dot at all is never absolute, and neither is a scheme-relative
/// `//host/path`.
///
/// # Examples
///
/// ```
/// use samesite_crawler::url::is_absolute;
///
/// assert!(is_absolute("https://example.com/page"));
/// assert!(!is_absolute("/results"));
/// assert!(!is_absolute("//example.com/page"));
/// assert!(!is_absolute("http://localhost/page"));
/// ```
pub fn is_absolute(href: &str) -> bool {
    match (href.find("://"), href.find('.')) {
        (Some(scheme_end), Some(first_dot)) => scheme_end < first_dot,
        _ => false,
    }
}

/// Checks whether a candidate URL is on the same host as the TLD
///
/// Both strings are parsed; if either fails the candidate is excluded and a
/// warning is logged. Scheme, userinfo and path are ignored, only
/// `host[:port]` is compared, byte for byte as written. `EXAMPLE.com` and
/// `example.com:80` are different hosts from `example.com`.
///
/// # Arguments
///
/// * `tld` - The crawl's TLD
/// * `candidate` - An absolute URL found on a page
///
/// # Returns
///
/// `true` if both parse and their hosts (and ports) are byte-equal
pub fn tld_matches(tld: &str, candidate: &str) -> bool {
    if let Err(e) = Url::parse(tld) {
        tracing::warn!("Cannot parse URL, excluding from the list {}: {}", tld, e);
        return false;
    }

    if let Err(e) = Url::parse(candidate) {
        tracing::warn!(
            "Cannot parse URL, excluding from the list {}: {}",
            candidate,
            e
        );
        return false;
    }

    match (raw_host(tld), raw_host(candidate)) {
        (Some(tld_host), Some(candidate_host)) => tld_host == candidate_host,
        _ => false,
    }
}
