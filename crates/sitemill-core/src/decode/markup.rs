//! XML sitemaps (urlset, sitemapindex) and RSS/Atom feeds.

use std::borrow::Cow;
use std::io::{self, BufRead};
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use url::Url;

use super::builder::{BuildError, SitemapBuilder};
use super::UTF8_BOM;
use crate::error::{ParseError, Result};
use crate::parser::ParserConfig;
use crate::sitemap::Sitemap;

/// Decodes a markup sitemap from a byte stream.
///
/// Read failures are always fatal. Well-formedness failures are fatal
/// unless `config.allow_partial` is set, in which case the entries seen
/// before the failure are returned. A document whose root element was
/// never seen, or is not a sitemap root, fails in either mode.
pub fn decode_markup<R: BufRead>(url: &Url, reader: R, config: &ParserConfig) -> Result<Sitemap> {
    tracing::debug!(%url, "processing xml sitemap");

    let reader = skip_bom(reader).map_err(|source| ParseError::Read {
        url: url.clone(),
        source,
    })?;
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().expand_empty_elements = true;

    let mut builder = SitemapBuilder::new(url.clone(), config.strict, config.max_urls);
    let mut buf = Vec::new();

    loop {
        let step = match xml.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(event) => feed(&mut builder, event),
            Err(quick_xml::Error::Io(e)) => {
                return Err(ParseError::Read {
                    url: url.clone(),
                    source: unwrap_io(e),
                })
            }
            Err(e) => Err(Failure::Xml(e)),
        };
        if let Err(failure) = step {
            return failure.resolve(url, builder, config.allow_partial);
        }
        buf.clear();
    }

    if let Err(e) = builder.check_complete() {
        return Failure::Build(e).resolve(url, builder, config.allow_partial);
    }
    let doc = builder.finish().map_err(|e| ParseError::Malformed {
        url: url.clone(),
        reason: e.to_string(),
        source: None,
    })?;
    tracing::debug!(%url, entries = doc.len(), kind = ?doc.kind(), "xml sitemap processed");
    Ok(doc)
}

/// A well-formedness failure, before the partial policy is applied.
enum Failure {
    Xml(quick_xml::Error),
    Build(BuildError),
}

impl Failure {
    fn resolve(
        self,
        url: &Url,
        builder: SitemapBuilder,
        allow_partial: bool,
    ) -> Result<Sitemap> {
        let tolerable = !matches!(
            self,
            Failure::Build(BuildError::UnknownRoot(_) | BuildError::NoRoot)
        );
        if allow_partial && tolerable {
            if let Some(doc) = builder.into_document() {
                tracing::warn!(%url, entries = doc.len(), "processed broken/partial sitemap");
                return Ok(doc);
            }
        }
        let (reason, source) = match self {
            Failure::Xml(e) => (e.to_string(), Some(e)),
            Failure::Build(e) => (e.to_string(), None),
        };
        Err(ParseError::Malformed {
            url: url.clone(),
            reason,
            source,
        })
    }
}

fn feed(builder: &mut SitemapBuilder, event: Event<'_>) -> std::result::Result<(), Failure> {
    match event {
        Event::Start(e) => {
            let name = local_name(&e);
            builder.start(&name, |key| attribute(&e, key)).map_err(Failure::Build)
        }
        Event::Empty(e) => {
            let name = local_name(&e);
            builder.start(&name, |key| attribute(&e, key)).map_err(Failure::Build)?;
            builder.end(&name).map_err(Failure::Build)
        }
        Event::End(e) => {
            let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
            builder.end(&name).map_err(Failure::Build)
        }
        Event::Text(e) => {
            let text = e.unescape().map_err(Failure::Xml)?;
            builder.text(&text).map_err(Failure::Build)
        }
        Event::CData(e) => builder
            .text(&String::from_utf8_lossy(&e))
            .map_err(Failure::Build),
        _ => Ok(()),
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Attribute value by local name, unescaped.
fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(Cow::into_owned))
}

fn skip_bom<R: BufRead>(mut reader: R) -> io::Result<R> {
    if reader.fill_buf()?.starts_with(UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }
    Ok(reader)
}

fn unwrap_io(e: Arc<io::Error>) -> io::Error {
    Arc::try_unwrap(e).unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string()))
}
