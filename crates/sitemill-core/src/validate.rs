//! Base-URL containment check.
//!
//! A sitemap may only advertise URLs at or below its own location
//! (<https://www.sitemaps.org/protocol.html#location>).

use url::Url;

/// Returns true if `candidate` starts with `base`, byte for byte.
///
/// No normalization is applied: scheme, host and path case all matter.
/// An empty base never matches.
pub fn is_under_base(base: &str, candidate: &str) -> bool {
    if base.is_empty() || base.len() > candidate.len() {
        return false;
    }
    candidate.as_bytes()[..base.len()] == *base.as_bytes()
}

/// Directory prefix of a sitemap URL, used as the base for [`is_under_base`].
///
/// `http://a.com/dir/sitemap.xml?x=1` becomes `http://a.com/dir/`.
/// URLs that cannot act as a base (e.g. `mailto:`) are returned unchanged.
pub fn base_url_of(url: &Url) -> String {
    match url.join("./") {
        Ok(base) => base.into(),
        Err(_) => url.as_str().to_string(),
    }
}
