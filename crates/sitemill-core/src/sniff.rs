//! Best-guess content type from leading bytes and a filename hint.
//!
//! Used only when the caller has no declared `Content-Type`.

use crate::media_type::OCTET_STREAM;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes inspected when looking for a markup root element.
const PROLOG_WINDOW: usize = 1024;

/// Detects a content type for `data`, using `filename` when bytes are inconclusive.
pub fn detect(data: &[u8], filename: Option<&str>) -> String {
    if let Some(mt) = detect_magic(data) {
        return mt.to_string();
    }
    if let Some(mt) = filename.and_then(detect_extension) {
        return mt.to_string();
    }
    if !data.is_empty() && looks_like_text(data) {
        return "text/plain".to_string();
    }
    OCTET_STREAM.to_string()
}

fn detect_magic(data: &[u8]) -> Option<&'static str> {
    match data {
        [0x1F, 0x8B, ..] => Some("application/gzip"),
        _ => detect_markup(data),
    }
}

fn detect_markup(data: &[u8]) -> Option<&'static str> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data.iter().position(|b| !b.is_ascii_whitespace())?;
    let head = &data[start..data.len().min(start + PROLOG_WINDOW)];
    if head.first() != Some(&b'<') {
        return None;
    }

    let lower = String::from_utf8_lossy(head).to_ascii_lowercase();
    // Prolog longer than the window: still markup, root unknown.
    let Some(root) = first_root_tag(&lower) else {
        return Some("application/xml");
    };
    let mt = if root.starts_with("<rss") {
        "application/rss+xml"
    } else if root.starts_with("<feed") {
        "application/atom+xml"
    } else if root.starts_with("<html") || root.starts_with("<!doctype html") {
        "text/html"
    } else {
        "application/xml"
    };
    Some(mt)
}

/// Skips `<?...?>` declarations and `<!-- -->` comments; returns the text
/// from the first real tag onwards.
fn first_root_tag(s: &str) -> Option<&str> {
    let mut rest = s.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("<?") {
            rest = after.split_once("?>").map(|(_, r)| r.trim_start())?;
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.split_once("-->").map(|(_, r)| r.trim_start())?;
        } else if rest.starts_with('<') {
            return Some(rest);
        } else {
            return None;
        }
    }
}

fn detect_extension(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "xml" => Some("application/xml"),
        "gz" | "gzip" => Some("application/gzip"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

fn looks_like_text(data: &[u8]) -> bool {
    !data.contains(&0) && std::str::from_utf8(data).is_ok()
}
