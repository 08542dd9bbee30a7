//! Sitemap detection, dispatch and decoding.
//!
//! Give [`SitemapParser::parse`] the raw bytes of a sitemap, its URL and
//! (optionally) the declared content type; get back a [`Sitemap`]: either a
//! urlset of pages or an index of further sitemaps. Plain text, XML (with
//! RSS and Atom feeds treated as urlsets) and gzip-compressed XML are
//! supported. Fetching and crawling are left to the caller.

pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod media_type;
pub mod parser;
pub mod sitemap;
pub mod sniff;
pub mod validate;

pub use error::{ParseError, Result};
pub use media_type::{classify, Classification};
pub use parser::{ParserConfig, SitemapParser};
pub use sitemap::{
    IndexEntry, Sitemap, SitemapFormat, SitemapIndex, SitemapKind, UrlEntry, UrlSet, MAX_BYTES,
    MAX_URLS,
};
pub use validate::is_under_base;
