//! Content type → document family.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::registry::{APPLICATION_GZIP, APPLICATION_XML, REGISTRY, TEXT_PLAIN};
use super::MediaType;

/// Upper bound on supertype hops; the builtin chains are at most three deep.
const MAX_DEPTH: usize = 16;

/// Document family a content type resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Markup,
    PlainText,
    Compressed,
    /// No family matched; carries the type string as declared.
    Unrecognized(String),
}

/// One family: its base type plus every registered alias.
struct Family(HashSet<&'static str>);

impl Family {
    fn of(base: &'static str) -> Self {
        let mut set: HashSet<&'static str> = REGISTRY.aliases_of(base).into_iter().collect();
        set.insert(base);
        Family(set)
    }

    fn contains(&self, mt: &MediaType) -> bool {
        self.0.contains(mt.as_str())
    }
}

static MARKUP: LazyLock<Family> = LazyLock::new(|| Family::of(APPLICATION_XML));
static PLAIN_TEXT: LazyLock<Family> = LazyLock::new(|| Family::of(TEXT_PLAIN));
static COMPRESSED: LazyLock<Family> = LazyLock::new(|| Family::of(APPLICATION_GZIP));

/// Classifies a declared or sniffed content type.
///
/// Climbs the supertype chain until a family matches. Stops with
/// [`Classification::Unrecognized`] at `application/octet-stream`, on a
/// repeated type, or after [`MAX_DEPTH`] hops.
pub fn classify(declared: &str) -> Classification {
    let unrecognized = || Classification::Unrecognized(declared.to_string());

    let Some(mut current) = MediaType::parse(declared) else {
        return unrecognized();
    };
    let mut visited = HashSet::new();

    for _ in 0..MAX_DEPTH {
        if !visited.insert(current.clone()) {
            break;
        }
        if MARKUP.contains(&current) {
            return Classification::Markup;
        }
        if PLAIN_TEXT.contains(&current) {
            return Classification::PlainText;
        }
        if COMPRESSED.contains(&current) {
            return Classification::Compressed;
        }
        match REGISTRY.supertype(&current) {
            Some(parent) => current = REGISTRY.canonical(parent),
            None => break,
        }
    }

    tracing::debug!(content_type = declared, "no sitemap family for media type");
    unrecognized()
}
