//! Media types and their classification into sitemap document families.
//!
//! Declared or sniffed content types are often more specific than the three
//! types we decode (`application/rss+xml`, `text/html`, ...). The registry
//! knows each type's parent, and [`classify`] climbs that chain until it
//! hits a family or the generic binary type.

mod classify;
mod registry;

pub use classify::{classify, Classification};
pub use registry::{MediaTypeRegistry, REGISTRY};

use std::fmt;

/// Generic binary type: the root of the supertype chain.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A parsed `type/subtype` pair, lowercased, without parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    essence: String,
    slash: usize,
}

impl MediaType {
    /// Parses `text/xml; charset=UTF-8` style strings.
    ///
    /// Returns `None` when there is no `type/subtype` pair.
    pub fn parse(s: &str) -> Option<Self> {
        let essence = s.split(';').next()?.trim().to_ascii_lowercase();
        let slash = essence.find('/')?;
        let (ty, sub) = (&essence[..slash], &essence[slash + 1..]);
        if ty.is_empty() || sub.is_empty() || sub.contains('/') {
            return None;
        }
        if essence.chars().any(|c| c.is_whitespace()) {
            return None;
        }
        Some(Self { essence, slash })
    }

    pub fn type_(&self) -> &str {
        &self.essence[..self.slash]
    }

    pub fn subtype(&self) -> &str {
        &self.essence[self.slash + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.essence
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.essence)
    }
}
