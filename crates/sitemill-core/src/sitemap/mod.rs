//! Parsed sitemap documents.
//!
//! A document is either a urlset (leaf: pages to crawl) or an index
//! (references to further sitemaps). Both are built empty by a decoder,
//! filled during one decode call and handed back by value.

mod entry;

pub use entry::{IndexEntry, UrlEntry};

use serde::Serialize;
use url::Url;

use crate::validate;

/// Maximum entries per document (<https://www.sitemaps.org/protocol.html>).
pub const MAX_URLS: usize = 50_000;

/// Recommended maximum document size in bytes (10 MiB).
pub const MAX_BYTES: usize = 10_485_760;

/// Leaf vs index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapKind {
    UrlSet,
    Index,
}

/// Syntax the document was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapFormat {
    Text,
    Xml,
    Rss,
    Atom,
}

/// Fields shared by both document kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    url: Url,
    base_url: String,
    format: SitemapFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    processed: bool,
    #[serde(skip)]
    max_urls: usize,
}

impl DocumentInfo {
    fn new(url: Url, format: SitemapFormat, max_urls: usize) -> Self {
        let base_url = validate::base_url_of(&url);
        Self {
            url,
            base_url,
            format,
            last_modified: None,
            processed: false,
            max_urls,
        }
    }

    /// Location of the document (for gzip input: the uncompressed location).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Prefix every entry must start with to be valid.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn format(&self) -> SitemapFormat {
        self.format
    }

    /// Transport-level last modification time; never read from content.
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub(crate) fn mark_processed(&mut self) {
        self.processed = true;
    }
}

/// Leaf sitemap: URLs to crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlSet {
    #[serde(flatten)]
    info: DocumentInfo,
    entries: Vec<UrlEntry>,
}

impl UrlSet {
    pub(crate) fn new(url: Url, format: SitemapFormat, max_urls: usize) -> Self {
        Self {
            info: DocumentInfo::new(url, format, max_urls),
            entries: Vec::new(),
        }
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    pub(crate) fn mark_processed(&mut self) {
        self.info.mark_processed();
    }

    /// Appends unless the document is full; returns whether it was added.
    pub(crate) fn push(&mut self, entry: UrlEntry) -> bool {
        if self.entries.len() >= self.info.max_urls {
            return false;
        }
        self.entries.push(entry);
        true
    }
}

/// Index sitemap: references to other sitemaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapIndex {
    #[serde(flatten)]
    info: DocumentInfo,
    sitemaps: Vec<IndexEntry>,
}

impl SitemapIndex {
    pub(crate) fn new(url: Url, max_urls: usize) -> Self {
        Self {
            info: DocumentInfo::new(url, SitemapFormat::Xml, max_urls),
            sitemaps: Vec::new(),
        }
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn sitemaps(&self) -> &[IndexEntry] {
        &self.sitemaps
    }

    pub(crate) fn mark_processed(&mut self) {
        self.info.mark_processed();
    }

    pub(crate) fn push(&mut self, entry: IndexEntry) -> bool {
        if self.sitemaps.len() >= self.info.max_urls {
            return false;
        }
        self.sitemaps.push(entry);
        true
    }
}

/// A decoded sitemap document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Sitemap {
    UrlSet(UrlSet),
    Index(SitemapIndex),
}

impl Sitemap {
    pub fn kind(&self) -> SitemapKind {
        match self {
            Sitemap::UrlSet(_) => SitemapKind::UrlSet,
            Sitemap::Index(_) => SitemapKind::Index,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Sitemap::Index(_))
    }

    pub fn info(&self) -> &DocumentInfo {
        match self {
            Sitemap::UrlSet(s) => &s.info,
            Sitemap::Index(s) => &s.info,
        }
    }

    fn info_mut(&mut self) -> &mut DocumentInfo {
        match self {
            Sitemap::UrlSet(s) => &mut s.info,
            Sitemap::Index(s) => &mut s.info,
        }
    }

    pub fn url(&self) -> &Url {
        self.info().url()
    }

    pub fn base_url(&self) -> &str {
        self.info().base_url()
    }

    pub fn format(&self) -> SitemapFormat {
        self.info().format()
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.info().last_modified()
    }

    /// Records a last-modified time taken from transport metadata.
    pub fn set_last_modified(&mut self, value: Option<String>) {
        self.info_mut().last_modified = value;
    }

    pub fn is_processed(&self) -> bool {
        self.info().is_processed()
    }

    pub(crate) fn mark_processed(&mut self) {
        self.info_mut().mark_processed();
    }

    /// Number of entries, whichever kind.
    pub fn len(&self) -> usize {
        match self {
            Sitemap::UrlSet(s) => s.entries.len(),
            Sitemap::Index(s) => s.sitemaps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_url_set(&self) -> Option<&UrlSet> {
        match self {
            Sitemap::UrlSet(s) => Some(s),
            Sitemap::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<&SitemapIndex> {
        match self {
            Sitemap::Index(s) => Some(s),
            Sitemap::UrlSet(_) => None,
        }
    }
}

impl From<UrlSet> for Sitemap {
    fn from(s: UrlSet) -> Self {
        Sitemap::UrlSet(s)
    }
}

impl From<SitemapIndex> for Sitemap {
    fn from(s: SitemapIndex) -> Self {
        Sitemap::Index(s)
    }
}
