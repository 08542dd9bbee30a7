//! Entries of a urlset and of a sitemap index.

use serde::Serialize;
use url::Url;

/// One `<url>` of a urlset (or one line of a text sitemap, one feed item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlEntry {
    loc: Url,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    change_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
}

impl UrlEntry {
    pub(crate) fn new(loc: Url, valid: bool) -> Self {
        Self {
            loc,
            valid,
            last_modified: None,
            change_frequency: None,
            priority: None,
        }
    }

    pub(crate) fn with_last_modified(mut self, value: Option<String>) -> Self {
        self.last_modified = value;
        self
    }

    pub(crate) fn with_change_frequency(mut self, value: Option<String>) -> Self {
        self.change_frequency = value;
        self
    }

    pub(crate) fn with_priority(mut self, value: Option<String>) -> Self {
        self.priority = value;
        self
    }

    pub fn loc(&self) -> &Url {
        &self.loc
    }

    /// False only in non-strict mode, for a URL outside the document's base.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn change_frequency(&self) -> Option<&str> {
        self.change_frequency.as_deref()
    }

    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }
}

/// One `<sitemap>` reference of a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    loc: Url,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

impl IndexEntry {
    pub(crate) fn new(loc: Url, valid: bool) -> Self {
        Self {
            loc,
            valid,
            last_modified: None,
        }
    }

    pub(crate) fn with_last_modified(mut self, value: Option<String>) -> Self {
        self.last_modified = value;
        self
    }

    pub fn loc(&self) -> &Url {
        &self.loc
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }
}
