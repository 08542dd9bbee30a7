//! Sitemap parser: content type → decoder dispatch.
//!
//! The parser holds only immutable settings, so one instance can be shared
//! across threads and reused for any number of documents.

use url::Url;

use crate::decode::{decode_gzip, decode_markup, decode_text};
use crate::error::{ParseError, Result};
use crate::media_type::{classify, Classification};
use crate::sitemap::{Sitemap, MAX_BYTES, MAX_URLS};
use crate::sniff;

/// Parser settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Drop entries whose URL is not under the sitemap's base URL.
    pub strict: bool,
    /// Return the entries parsed so far when the markup is broken.
    pub allow_partial: bool,
    /// Entry ceiling per document.
    pub max_urls: usize,
    /// Ceiling on decompressed bytes for gzip sitemaps.
    pub max_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict: true,
            allow_partial: false,
            max_urls: MAX_URLS,
            max_bytes: MAX_BYTES,
        }
    }
}

impl ParserConfig {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    pub fn max_urls(mut self, n: usize) -> Self {
        self.max_urls = n;
        self
    }

    pub fn max_bytes(mut self, n: usize) -> Self {
        self.max_bytes = n;
        self
    }
}

/// Turns sitemap bytes into a [`Sitemap`].
#[derive(Debug, Clone, Default)]
pub struct SitemapParser {
    config: ParserConfig,
}

impl SitemapParser {
    pub fn new(strict: bool, allow_partial: bool) -> Self {
        Self::with_config(
            ParserConfig::default()
                .strict(strict)
                .allow_partial(allow_partial),
        )
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Whether URLs outside the base URL are rejected.
    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    pub fn allows_partial(&self) -> bool {
        self.config.allow_partial
    }

    /// Parses `content` fetched from `url`.
    ///
    /// `content_type` is trusted when given; otherwise the type is sniffed
    /// from the bytes and the URL's filename.
    pub fn parse(&self, content_type: Option<&str>, content: &[u8], url: &Url) -> Result<Sitemap> {
        let sniffed;
        let content_type = match content_type {
            Some(ct) => ct,
            None => {
                sniffed = sniff::detect(content, filename_of(url));
                tracing::debug!(%url, content_type = %sniffed, "sniffed sitemap content type");
                &sniffed
            }
        };

        match classify(content_type) {
            Classification::Markup => decode_markup(url, content, &self.config),
            Classification::PlainText => Ok(decode_text(url, content, &self.config).into()),
            Classification::Compressed => decode_gzip(url, content, &self.config),
            Classification::Unrecognized(content_type) => Err(ParseError::UnknownFormat {
                content_type,
                url: url.clone(),
            }),
        }
    }

    /// Parses with a sniffed content type.
    pub fn parse_bytes(&self, content: &[u8], url: &Url) -> Result<Sitemap> {
        self.parse(None, content, url)
    }

    /// Re-parses fresh content for a previously parsed document, keeping
    /// its URL and carrying over its last-modified time.
    pub fn parse_with_previous(
        &self,
        content_type: Option<&str>,
        content: &[u8],
        previous: &Sitemap,
    ) -> Result<Sitemap> {
        let mut sitemap = self.parse(content_type, content, previous.url())?;
        sitemap.set_last_modified(previous.last_modified().map(str::to_string));
        Ok(sitemap)
    }
}

/// Last path segment, used as the filename hint for sniffing.
fn filename_of(url: &Url) -> Option<&str> {
    url.path_segments()?.last().filter(|s| !s.is_empty())
}
