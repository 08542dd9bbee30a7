//! Static alias and supertype tables.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{MediaType, OCTET_STREAM};

pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_GZIP: &str = "application/gzip";

/// Alias → canonical type.
const ALIASES: &[(&str, &str)] = &[
    ("text/xml", APPLICATION_XML),
    ("application/x-xml", APPLICATION_XML),
    ("application/x-gzip", APPLICATION_GZIP),
    ("application/x-gunzip", APPLICATION_GZIP),
    ("application/gzipped", APPLICATION_GZIP),
    ("application/gzip-compressed", APPLICATION_GZIP),
    ("application/x-gzip-compressed", APPLICATION_GZIP),
    ("gzip/document", APPLICATION_GZIP),
];

/// Explicit child → parent links. Types not listed fall back to the
/// structural rules in [`MediaTypeRegistry::supertype`].
const SUPERTYPES: &[(&str, &str)] = &[
    (APPLICATION_XML, TEXT_PLAIN),
    ("application/rss+xml", APPLICATION_XML),
    ("application/atom+xml", APPLICATION_XML),
    ("application/rdf+xml", APPLICATION_XML),
    ("application/xhtml+xml", APPLICATION_XML),
    ("application/xslt+xml", APPLICATION_XML),
    ("image/svg+xml", APPLICATION_XML),
    ("text/html", TEXT_PLAIN),
    ("text/csv", TEXT_PLAIN),
    ("text/uri-list", TEXT_PLAIN),
];

/// Process-wide registry, built on first use and never mutated.
pub static REGISTRY: LazyLock<MediaTypeRegistry> = LazyLock::new(MediaTypeRegistry::builtin);

/// Lookup tables for media type aliases and the parent of each type.
#[derive(Debug)]
pub struct MediaTypeRegistry {
    aliases: HashMap<&'static str, &'static str>,
    supertypes: HashMap<&'static str, &'static str>,
}

impl MediaTypeRegistry {
    fn builtin() -> Self {
        Self {
            aliases: ALIASES.iter().copied().collect(),
            supertypes: SUPERTYPES.iter().copied().collect(),
        }
    }

    /// Maps an alias onto its canonical type; other types pass through.
    pub fn canonical(&self, mt: MediaType) -> MediaType {
        match self.aliases.get(mt.as_str()).and_then(|c| MediaType::parse(c)) {
            Some(canonical) => canonical,
            None => mt,
        }
    }

    /// Every registered alias of `canonical`, in table order.
    pub fn aliases_of(&self, canonical: &str) -> Vec<&'static str> {
        ALIASES
            .iter()
            .filter(|(_, c)| *c == canonical)
            .map(|(alias, _)| *alias)
            .collect()
    }

    /// Parent of `mt`, or `None` once the generic binary type is reached.
    pub fn supertype(&self, mt: &MediaType) -> Option<MediaType> {
        if mt.as_str() == OCTET_STREAM {
            return None;
        }
        if let Some(parent) = self.supertypes.get(mt.as_str()) {
            return MediaType::parse(parent);
        }
        let parent = if mt.subtype().ends_with("+xml") {
            APPLICATION_XML
        } else if mt.subtype().ends_with("+gzip") {
            APPLICATION_GZIP
        } else if mt.type_() == "text" && mt.as_str() != TEXT_PLAIN {
            TEXT_PLAIN
        } else {
            OCTET_STREAM
        };
        MediaType::parse(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mt(s: &str) -> MediaType {
        MediaType::parse(s).unwrap()
    }

    #[test]
    fn aliases_canonicalize() {
        assert_eq!(REGISTRY.canonical(mt("text/xml")).as_str(), APPLICATION_XML);
        assert_eq!(REGISTRY.canonical(mt("application/x-gzip")).as_str(), APPLICATION_GZIP);
        assert_eq!(REGISTRY.canonical(mt("text/html")).as_str(), "text/html");
    }

    #[test]
    fn aliases_of_gzip() {
        let aliases = REGISTRY.aliases_of(APPLICATION_GZIP);
        assert!(aliases.contains(&"application/x-gzip"));
        assert!(aliases.contains(&"gzip/document"));
        assert!(REGISTRY.aliases_of(TEXT_PLAIN).is_empty());
    }

    #[test]
    fn explicit_and_structural_supertypes() {
        assert_eq!(
            REGISTRY.supertype(&mt("application/rss+xml")).unwrap().as_str(),
            APPLICATION_XML
        );
        assert_eq!(
            REGISTRY.supertype(&mt("application/vnd.custom+xml")).unwrap().as_str(),
            APPLICATION_XML
        );
        assert_eq!(REGISTRY.supertype(&mt("text/markdown")).unwrap().as_str(), TEXT_PLAIN);
        assert_eq!(REGISTRY.supertype(&mt(TEXT_PLAIN)).unwrap().as_str(), OCTET_STREAM);
        assert_eq!(REGISTRY.supertype(&mt("image/png")).unwrap().as_str(), OCTET_STREAM);
    }

    #[test]
    fn octet_stream_is_terminal() {
        assert!(REGISTRY.supertype(&mt(OCTET_STREAM)).is_none());
    }
}
