//! Text sitemaps: one URL per line, no metadata.

use url::Url;

use super::{admit_logged, UTF8_BOM};
use crate::parser::ParserConfig;
use crate::sitemap::{SitemapFormat, UrlEntry, UrlSet};

/// Decodes a plain-text sitemap. Never fails: bad lines are skipped.
///
/// At most `config.max_urls` non-blank lines are considered; later lines
/// are ignored. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_text(url: &Url, content: &[u8], config: &ParserConfig) -> UrlSet {
    tracing::debug!(%url, bytes = content.len(), "processing text sitemap");

    let mut sitemap = UrlSet::new(url.clone(), SitemapFormat::Text, config.max_urls);
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let text = String::from_utf8_lossy(content);
    let base = sitemap.info().base_url().to_string();

    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    for (i, line) in lines.take(config.max_urls).enumerate() {
        let Some((loc, valid)) = admit_logged(&base, line, config.strict) else {
            continue;
        };
        tracing::debug!(index = i + 1, %loc, valid, "text sitemap entry");
        sitemap.push(UrlEntry::new(loc, valid));
    }

    sitemap.mark_processed();
    sitemap
}
