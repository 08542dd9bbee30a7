//! Document-level failures returned by the parser.
//!
//! Per-entry problems (bad URL, outside base) never abort a decode; they are
//! reported as [`crate::decode::EntryRejection`] and logged instead.

use std::io;

use url::Url;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Why a sitemap document could not be turned into a [`crate::Sitemap`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The content type did not resolve to markup, plain text or gzip.
    #[error("can't parse a sitemap with the media type of: {content_type} (at: {url})")]
    UnknownFormat { content_type: String, url: Url },

    /// Reading or decompressing the document bytes failed.
    #[error("failed to read sitemap {url}: {source}")]
    Read {
        url: Url,
        #[source]
        source: io::Error,
    },

    /// The markup was not well formed, or its root element is not a sitemap root.
    #[error("malformed sitemap {url}: {reason}")]
    Malformed {
        url: Url,
        reason: String,
        #[source]
        source: Option<quick_xml::Error>,
    },
}

impl ParseError {
    /// URL of the document that failed.
    pub fn url(&self) -> &Url {
        match self {
            ParseError::UnknownFormat { url, .. }
            | ParseError::Read { url, .. }
            | ParseError::Malformed { url, .. } => url,
        }
    }
}
