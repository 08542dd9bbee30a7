//! Accumulating builder driven by markup events.
//!
//! States: `AwaitingRoot → InDocument ⇄ InEntry → Done`. The root element
//! decides the document kind; each entry element opens one scratch slot
//! that is validated and appended when the entry closes.

use url::Url;

use super::admit_logged;
use crate::sitemap::{IndexEntry, Sitemap, SitemapFormat, SitemapIndex, UrlEntry, UrlSet};

/// Root element vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    Index,
    Rss,
    Atom,
}

impl Root {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "urlset" => Some(Root::UrlSet),
            "sitemapindex" => Some(Root::Index),
            "rss" => Some(Root::Rss),
            "feed" => Some(Root::Atom),
            _ => None,
        }
    }

    fn entry_element(self) -> &'static str {
        match self {
            Root::UrlSet => "url",
            Root::Index => "sitemap",
            Root::Rss => "item",
            Root::Atom => "entry",
        }
    }

    /// Field filled by the text of a direct child of an entry.
    fn field(self, name: &str) -> Option<Field> {
        match (self, name) {
            (Root::UrlSet | Root::Index, "loc") => Some(Field::Loc),
            (Root::UrlSet | Root::Index, "lastmod") => Some(Field::LastModified),
            (Root::UrlSet, "changefreq") => Some(Field::ChangeFrequency),
            (Root::UrlSet, "priority") => Some(Field::Priority),
            (Root::Rss, "link") => Some(Field::Loc),
            (Root::Rss, "pubDate") => Some(Field::LastModified),
            (Root::Atom, "updated") => Some(Field::LastModified),
            _ => None,
        }
    }

    fn new_document(self, url: Url, max_urls: usize) -> Sitemap {
        match self {
            Root::UrlSet => UrlSet::new(url, SitemapFormat::Xml, max_urls).into(),
            Root::Rss => UrlSet::new(url, SitemapFormat::Rss, max_urls).into(),
            Root::Atom => UrlSet::new(url, SitemapFormat::Atom, max_urls).into(),
            Root::Index => SitemapIndex::new(url, max_urls).into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastModified,
    ChangeFrequency,
    Priority,
}

/// Entry under construction.
#[derive(Debug, Default)]
struct Scratch {
    /// Depth of the entry element itself.
    depth: usize,
    loc: Option<String>,
    last_modified: Option<String>,
    change_frequency: Option<String>,
    priority: Option<String>,
    /// Field whose text is being collected, with the text so far.
    open_field: Option<(Field, String)>,
}

impl Scratch {
    fn set(&mut self, field: Field, text: &str) {
        let value = text.trim();
        if value.is_empty() {
            return;
        }
        let slot = match field {
            Field::Loc => &mut self.loc,
            Field::LastModified => &mut self.last_modified,
            Field::ChangeFrequency => &mut self.change_frequency,
            Field::Priority => &mut self.priority,
        };
        *slot = Some(value.to_string());
    }
}

#[derive(Debug)]
enum State {
    AwaitingRoot,
    InDocument,
    InEntry(Scratch),
    Done,
}

/// Structural problem detected by the builder itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum BuildError {
    #[error("unrecognized root element <{0}>")]
    UnknownRoot(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("unexpected end of document inside <{0}>")]
    Truncated(String),
    #[error("unexpected end tag </{0}>")]
    UnexpectedEnd(String),
    #[error("content after the root element: {0}")]
    TrailingContent(String),
}

pub(crate) struct SitemapBuilder {
    url: Url,
    strict: bool,
    max_urls: usize,
    root: Option<Root>,
    doc: Option<Sitemap>,
    state: State,
    /// Names of currently open elements.
    open: Vec<String>,
    full: bool,
}

impl SitemapBuilder {
    pub(crate) fn new(url: Url, strict: bool, max_urls: usize) -> Self {
        Self {
            url,
            strict,
            max_urls,
            root: None,
            doc: None,
            state: State::AwaitingRoot,
            open: Vec::new(),
            full: false,
        }
    }

    /// Element start. `attr` looks up an attribute value by local name.
    pub(crate) fn start(
        &mut self,
        name: &str,
        attr: impl Fn(&str) -> Option<String>,
    ) -> Result<(), BuildError> {
        self.open.push(name.to_string());
        let depth = self.open.len();

        match &mut self.state {
            State::AwaitingRoot => {
                let root = Root::from_name(name)
                    .ok_or_else(|| BuildError::UnknownRoot(name.to_string()))?;
                tracing::debug!(url = %self.url, ?root, "sitemap root element");
                self.doc = Some(root.new_document(self.url.clone(), self.max_urls));
                self.root = Some(root);
                self.state = State::InDocument;
            }
            State::InDocument => {
                if self.root.map(Root::entry_element) == Some(name) {
                    self.state = State::InEntry(Scratch {
                        depth,
                        ..Scratch::default()
                    });
                }
            }
            State::InEntry(scratch) => {
                if depth != scratch.depth + 1 {
                    return Ok(());
                }
                let Some(root) = self.root else {
                    return Ok(());
                };
                if root == Root::Atom && name == "link" {
                    let rel = attr("rel");
                    if matches!(rel.as_deref(), None | Some("alternate")) {
                        if let Some(href) = attr("href") {
                            scratch.set(Field::Loc, &href);
                        }
                    }
                }
                if let Some(field) = root.field(name) {
                    scratch.open_field = Some((field, String::new()));
                }
            }
            State::Done => return Err(BuildError::TrailingContent(format!("<{name}>"))),
        }
        Ok(())
    }

    /// Character data (text or CDATA), already unescaped.
    pub(crate) fn text(&mut self, text: &str) -> Result<(), BuildError> {
        match &mut self.state {
            State::InEntry(Scratch {
                open_field: Some((_, buf)),
                ..
            }) => buf.push_str(text),
            State::Done if !text.trim().is_empty() => {
                return Err(BuildError::TrailingContent(text.trim().to_string()))
            }
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), BuildError> {
        let depth = self.open.len();
        match self.open.pop() {
            Some(open) if open == name => {}
            _ => return Err(BuildError::UnexpectedEnd(name.to_string())),
        }

        match &mut self.state {
            State::InEntry(scratch) if depth == scratch.depth => {
                let scratch = std::mem::take(scratch);
                self.state = State::InDocument;
                self.append(scratch);
            }
            State::InEntry(scratch) if depth == scratch.depth + 1 => {
                if let Some((field, buf)) = scratch.open_field.take() {
                    scratch.set(field, &buf);
                }
            }
            State::InDocument if depth == 1 => self.state = State::Done,
            _ => {}
        }
        Ok(())
    }

    fn append(&mut self, scratch: Scratch) {
        if self.full {
            return;
        }
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        let Some(raw) = scratch.loc.as_deref() else {
            tracing::debug!(url = %self.url, "sitemap entry without location skipped");
            return;
        };
        let Some((loc, valid)) = admit_logged(doc.base_url(), raw, self.strict) else {
            return;
        };

        let added = match doc {
            Sitemap::UrlSet(set) => set.push(
                UrlEntry::new(loc, valid)
                    .with_last_modified(scratch.last_modified)
                    .with_change_frequency(scratch.change_frequency)
                    .with_priority(scratch.priority),
            ),
            Sitemap::Index(index) => {
                index.push(IndexEntry::new(loc, valid).with_last_modified(scratch.last_modified))
            }
        };
        if !added {
            tracing::warn!(url = %self.url, max = self.max_urls, "sitemap entry limit reached, ignoring the rest");
            self.full = true;
        }
    }

    /// Fails unless the root element was seen and closed.
    pub(crate) fn check_complete(&self) -> Result<(), BuildError> {
        match (&self.state, &self.doc) {
            (State::Done, Some(_)) => Ok(()),
            (State::AwaitingRoot, _) | (_, None) => Err(BuildError::NoRoot),
            (_, Some(_)) => Err(BuildError::Truncated(
                self.open.last().cloned().unwrap_or_default(),
            )),
        }
    }

    /// Whatever was accumulated, marked processed; `None` if the root was
    /// never seen.
    pub(crate) fn into_document(self) -> Option<Sitemap> {
        let mut doc = self.doc?;
        doc.mark_processed();
        Some(doc)
    }

    /// Completed document.
    pub(crate) fn finish(self) -> Result<Sitemap, BuildError> {
        self.check_complete()?;
        self.into_document().ok_or(BuildError::NoRoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_attrs(_: &str) -> Option<String> {
        None
    }

    fn builder(url: &str, strict: bool) -> SitemapBuilder {
        SitemapBuilder::new(Url::parse(url).unwrap(), strict, 50_000)
    }

    fn leaf(b: &mut SitemapBuilder, name: &str, text: &str) {
        b.start(name, no_attrs).unwrap();
        b.text(text).unwrap();
        b.end(name).unwrap();
    }

    #[test]
    fn urlset_entry_with_metadata() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        b.start("urlset", no_attrs).unwrap();
        b.start("url", no_attrs).unwrap();
        leaf(&mut b, "loc", " http://a.com/1 ");
        leaf(&mut b, "lastmod", "2024-01-01");
        leaf(&mut b, "changefreq", "daily");
        leaf(&mut b, "priority", "0.8");
        b.end("url").unwrap();
        b.end("urlset").unwrap();

        let doc = b.finish().unwrap();
        assert!(doc.is_processed());
        let set = doc.as_url_set().unwrap();
        let e = &set.entries()[0];
        assert_eq!(e.loc().as_str(), "http://a.com/1");
        assert_eq!(e.last_modified(), Some("2024-01-01"));
        assert_eq!(e.change_frequency(), Some("daily"));
        assert_eq!(e.priority(), Some("0.8"));
    }

    #[test]
    fn index_ignores_leaf_only_fields() {
        let mut b = builder("http://a.com/index.xml", true);
        b.start("sitemapindex", no_attrs).unwrap();
        b.start("sitemap", no_attrs).unwrap();
        leaf(&mut b, "loc", "http://a.com/s1.xml");
        leaf(&mut b, "priority", "1.0");
        b.end("sitemap").unwrap();
        b.end("sitemapindex").unwrap();

        let doc = b.finish().unwrap();
        let index = doc.as_index().unwrap();
        assert_eq!(index.sitemaps().len(), 1);
        let json = serde_json::to_value(&index.sitemaps()[0]).unwrap();
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn nested_extension_loc_does_not_replace_page_loc() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        b.start("urlset", no_attrs).unwrap();
        b.start("url", no_attrs).unwrap();
        leaf(&mut b, "loc", "http://a.com/page");
        b.start("image", no_attrs).unwrap();
        leaf(&mut b, "loc", "http://a.com/img.png");
        b.end("image").unwrap();
        b.end("url").unwrap();
        b.end("urlset").unwrap();

        let doc = b.finish().unwrap();
        let set = doc.as_url_set().unwrap();
        assert_eq!(set.entries()[0].loc().as_str(), "http://a.com/page");
    }

    #[test]
    fn unknown_root_fails() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        assert_eq!(
            b.start("html", no_attrs),
            Err(BuildError::UnknownRoot("html".to_string()))
        );
    }

    #[test]
    fn unfinished_document_is_truncated_but_partial_is_available() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        b.start("urlset", no_attrs).unwrap();
        b.start("url", no_attrs).unwrap();
        leaf(&mut b, "loc", "http://a.com/1");
        b.end("url").unwrap();
        b.start("url", no_attrs).unwrap();
        b.start("loc", no_attrs).unwrap();
        b.text("http://a.com/2").unwrap();

        let so_far = entries_so_far(&b);
        assert_eq!(so_far, Some(1));
        assert_eq!(b.finish(), Err(BuildError::Truncated("loc".to_string())));
    }

    fn entries_so_far(b: &SitemapBuilder) -> Option<usize> {
        b.doc.as_ref().map(Sitemap::len)
    }

    #[test]
    fn no_root_partial_is_none() {
        let b = builder("http://a.com/sitemap.xml", true);
        assert!(b.into_document().is_none());
    }

    #[test]
    fn mismatched_end_is_an_error() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        b.start("urlset", no_attrs).unwrap();
        b.start("url", no_attrs).unwrap();
        assert_eq!(
            b.end("urlset"),
            Err(BuildError::UnexpectedEnd("urlset".to_string()))
        );
    }

    #[test]
    fn content_after_root_is_an_error() {
        let mut b = builder("http://a.com/sitemap.xml", true);
        b.start("urlset", no_attrs).unwrap();
        b.end("urlset").unwrap();
        b.text("\n  ").unwrap();
        assert_eq!(
            b.text("junk"),
            Err(BuildError::TrailingContent("junk".to_string()))
        );
        assert_eq!(
            b.start("url", no_attrs),
            Err(BuildError::TrailingContent("<url>".to_string()))
        );
    }

    #[test]
    fn entry_limit_stops_acceptance() {
        let mut b = SitemapBuilder::new(Url::parse("http://a.com/s.xml").unwrap(), true, 2);
        b.start("urlset", no_attrs).unwrap();
        for i in 1..=4 {
            b.start("url", no_attrs).unwrap();
            leaf(&mut b, "loc", &format!("http://a.com/{i}"));
            b.end("url").unwrap();
        }
        b.end("urlset").unwrap();
        let doc = b.finish().unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn atom_link_href() {
        let mut b = builder("http://a.com/feed.xml", true);
        b.start("feed", no_attrs).unwrap();
        b.start("entry", no_attrs).unwrap();
        b.start("link", |name| match name {
            "rel" => Some("alternate".to_string()),
            "href" => Some("http://a.com/post".to_string()),
            _ => None,
        })
        .unwrap();
        b.end("link").unwrap();
        b.start("link", |name| match name {
            "rel" => Some("edit".to_string()),
            "href" => Some("http://a.com/edit".to_string()),
            _ => None,
        })
        .unwrap();
        b.end("link").unwrap();
        leaf(&mut b, "updated", "2024-03-01T00:00:00Z");
        b.end("entry").unwrap();
        b.end("feed").unwrap();

        let doc = b.finish().unwrap();
        assert_eq!(doc.format(), SitemapFormat::Atom);
        let e = &doc.as_url_set().unwrap().entries()[0];
        assert_eq!(e.loc().as_str(), "http://a.com/post");
        assert_eq!(e.last_modified(), Some("2024-03-01T00:00:00Z"));
    }
}
