//! Per-family decoders: plain text, markup, gzip-wrapped markup.
//!
//! All of them run every candidate URL through [`admit`], so the base-URL
//! rule is the same regardless of which decoder found the URL.

mod builder;
mod gzip;
mod markup;
mod text;

pub use gzip::{decode_gzip, logical_url};
pub use markup::decode_markup;
pub use text::decode_text;

use url::Url;

use crate::validate::is_under_base;

pub(crate) const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Why a single entry was left out of a document. Never fatal.
#[derive(Debug, thiserror::Error)]
pub enum EntryRejection {
    #[error("bad url: [{raw}]: {source}")]
    MalformedUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("url {loc} is not under the base url {base}")]
    OutsideBase { loc: Url, base: String },
}

/// Parses and validates a candidate location.
///
/// On success returns the URL and its validity flag: in strict mode the
/// flag is always true (invalid URLs are rejected), otherwise it records
/// the base check.
///
/// The base check runs on `raw` as written, before URL normalization.
pub fn admit(base: &str, raw: &str, strict: bool) -> Result<(Url, bool), EntryRejection> {
    let raw = raw.trim();
    let loc = Url::parse(raw).map_err(|source| EntryRejection::MalformedUrl {
        raw: raw.to_string(),
        source,
    })?;
    let valid = is_under_base(base, raw);
    if !valid && strict {
        return Err(EntryRejection::OutsideBase {
            loc,
            base: base.to_string(),
        });
    }
    Ok((loc, valid))
}

/// [`admit`], logging rejections at warn level.
pub(crate) fn admit_logged(base: &str, raw: &str, strict: bool) -> Option<(Url, bool)> {
    match admit(base, raw, strict) {
        Ok(accepted) => Some(accepted),
        Err(rejection) => {
            tracing::warn!(%rejection, "sitemap entry excluded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_valid_url() {
        let (loc, valid) = admit("http://a.com/", "http://a.com/page", true).unwrap();
        assert_eq!(loc.as_str(), "http://a.com/page");
        assert!(valid);
    }

    #[test]
    fn strict_rejects_outside_base() {
        let err = admit("http://a.com/dir/", "http://a.com/other", true).unwrap_err();
        assert!(matches!(err, EntryRejection::OutsideBase { .. }));
    }

    #[test]
    fn lenient_flags_outside_base() {
        let (loc, valid) = admit("http://a.com/dir/", "http://b.com/x", false).unwrap();
        assert_eq!(loc.as_str(), "http://b.com/x");
        assert!(!valid);
    }

    #[test]
    fn malformed_rejected_in_both_modes() {
        for strict in [true, false] {
            let err = admit("http://a.com/", "not a url", strict).unwrap_err();
            assert!(matches!(err, EntryRejection::MalformedUrl { .. }));
        }
    }

    #[test]
    fn base_check_sees_the_url_as_written() {
        let raw = "HTTP://A.COM:80/x/../1";
        let (loc, valid) = admit("http://a.com/", raw, false).unwrap();
        assert_eq!(loc.as_str(), "http://a.com/1");
        assert!(!valid);
        assert!(admit("http://a.com/", raw, true).is_err());

        let (_, valid) = admit("http://a.com/", "  http://a.com/1  ", true).unwrap();
        assert!(valid);
    }

    #[test]
    fn relative_urls_are_malformed() {
        let err = admit("http://a.com/", "/page.html", false).unwrap_err();
        assert!(err.to_string().contains("/page.html"));
    }
}
