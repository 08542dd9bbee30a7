//! Sitemap fixtures written to temp dirs for integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

pub const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-05-01</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/about</loc>
    <image:image><image:loc>https://cdn.example.net/team.jpg</image:loc></image:image>
  </url>
  <url>
    <loc>https://other.example.org/partner</loc>
  </url>
</urlset>
"#;

pub const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-pages.xml.gz</loc><lastmod>2024-05-01</lastmod></sitemap>
  <sitemap><loc>https://example.com/sitemap-posts.txt</loc></sitemap>
</sitemapindex>
"#;

pub const TEXT: &str = "https://example.com/\nhttps://example.com/blog\n\nhttps://example.com/contact\n";

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::best());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// `<urlset>` with `n` entries under `https://example.com/`.
pub fn large_urlset(n: usize) -> String {
    let mut doc = String::from("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for i in 0..n {
        doc.push_str(&format!("<url><loc>https://example.com/p/{i}</loc></url>\n"));
    }
    doc.push_str("</urlset>\n");
    doc
}
