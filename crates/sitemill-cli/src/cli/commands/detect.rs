//! `sitemill detect` – sniff a file's content type.

use anyhow::{Context, Result};
use sitemill_core::{classify, sniff, Classification};
use std::fs;
use std::path::Path;

pub fn run_detect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let (content_type, family) = describe(&bytes, path);
    println!("{content_type}\t{family}\t{}", path.display());
    Ok(())
}

/// Sniffed type and the family name it classifies as.
fn describe(bytes: &[u8], path: &Path) -> (String, &'static str) {
    let filename = path.file_name().and_then(|n| n.to_str());
    let content_type = sniff::detect(bytes, filename);
    let family = match classify(&content_type) {
        Classification::Markup => "markup",
        Classification::PlainText => "text",
        Classification::Compressed => "gzip",
        Classification::Unrecognized(_) => "unrecognized",
    };
    (content_type, family)
}
