//! Gzip-framed sitemaps (`sitemap.xml.gz`).

use std::io::{self, BufReader, Read};

use flate2::read::GzDecoder;
use url::Url;

use super::markup::decode_markup;
use crate::error::{ParseError, Result};
use crate::parser::ParserConfig;
use crate::sitemap::Sitemap;

/// Location of the uncompressed document: the URL path minus a trailing `.gz`.
///
/// Entries are validated against this URL, not the compressed file's.
pub fn logical_url(url: &Url) -> Url {
    let mut xml_url = url.clone();
    if let Some(stripped) = url.path().strip_suffix(".gz") {
        xml_url.set_path(stripped);
    }
    xml_url
}

/// Decompresses `content` on the fly and decodes the markup inside.
///
/// Corrupt or oversized streams fail with [`ParseError::Read`]. Every
/// failure names the compressed URL; a returned document reports the
/// logical one.
pub fn decode_gzip(url: &Url, content: &[u8], config: &ParserConfig) -> Result<Sitemap> {
    let xml_url = logical_url(url);
    tracing::debug!(%url, %xml_url, "processing gzip sitemap");

    let decompressed = SizeLimit::new(GzDecoder::new(content), config.max_bytes);
    decode_markup(&xml_url, BufReader::new(decompressed), config).map_err(|e| match e {
        ParseError::Read { source, .. } => ParseError::Read {
            url: url.clone(),
            source,
        },
        ParseError::Malformed { reason, source, .. } => ParseError::Malformed {
            url: url.clone(),
            reason,
            source,
        },
        ParseError::UnknownFormat { content_type, .. } => ParseError::UnknownFormat {
            content_type,
            url: url.clone(),
        },
    })
}

/// Reader that fails once more than `limit` bytes have come through.
struct SizeLimit<R> {
    inner: R,
    remaining: usize,
    limit: usize,
}

impl<R: Read> SizeLimit<R> {
    fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
            limit,
        }
    }
}

impl<R: Read> Read for SizeLimit<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.remaining == 0 {
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe)? {
                0 => Ok(0),
                _ => Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("decompressed sitemap exceeds {} bytes", self.limit),
                )),
            };
        }
        let max = buf.len().min(self.remaining);
        let n = self.inner.read(&mut buf[..max])?;
        self.remaining -= n;
        Ok(n)
    }
}
