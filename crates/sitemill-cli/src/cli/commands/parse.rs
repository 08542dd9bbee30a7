//! `sitemill parse` – parse a sitemap file and print its entries.

use anyhow::{anyhow, bail, Context, Result};
use sitemill_core::config::SitemillConfig;
use sitemill_core::{ParserConfig, Sitemap, SitemapParser};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Arguments of `sitemill parse`.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub path: PathBuf,
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub lenient: bool,
    pub allow_partial: bool,
    pub json: bool,
}

pub fn run_parse(cfg: &SitemillConfig, opts: &ParseOptions) -> Result<()> {
    let doc = parse_file(cfg, opts)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.json {
        write_json(&doc, cfg.pretty_output(), &mut out)?;
    } else {
        write_table(&doc, &mut out)?;
    }
    Ok(())
}

/// Reads and parses the file named in `opts`, with CLI flags layered over config.
fn parse_file(cfg: &SitemillConfig, opts: &ParseOptions) -> Result<Sitemap> {
    let path = &opts.path;
    let size = fs::metadata(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    if size > cfg.max_bytes as u64 {
        bail!(
            "{} is {} bytes, over the {} byte limit",
            path.display(),
            size,
            cfg.max_bytes
        );
    }
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let url = match &opts.url {
        Some(u) => Url::parse(u).with_context(|| format!("invalid --url {u}"))?,
        None => file_url(path)?,
    };

    let mut parser_cfg = ParserConfig::from(cfg);
    if opts.lenient {
        parser_cfg.strict = false;
    }
    if opts.allow_partial {
        parser_cfg.allow_partial = true;
    }

    let doc = SitemapParser::with_config(parser_cfg).parse(
        opts.content_type.as_deref(),
        &bytes,
        &url,
    )?;
    tracing::info!(%url, kind = ?doc.kind(), entries = doc.len(), "parsed sitemap");
    Ok(doc)
}

fn file_url(path: &Path) -> Result<Url> {
    let abs = fs::canonicalize(path).with_context(|| format!("resolving {}", path.display()))?;
    Url::from_file_path(&abs).map_err(|()| anyhow!("cannot express {} as a file URL", abs.display()))
}

fn write_json(doc: &Sitemap, pretty: bool, out: &mut impl Write) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, doc)?;
    } else {
        serde_json::to_writer(&mut *out, doc)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_table(doc: &Sitemap, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:?} ({:?}), {} entries, base {}",
        doc.kind(),
        doc.format(),
        doc.len(),
        doc.base_url()
    )?;
    if doc.is_empty() {
        return Ok(());
    }
    match doc {
        Sitemap::UrlSet(set) => {
            writeln!(out, "{:<6} {:<25} {:<10} {:<8} URL", "VALID", "LASTMOD", "FREQ", "PRIO")?;
            for e in set.entries() {
                writeln!(
                    out,
                    "{:<6} {:<25} {:<10} {:<8} {}",
                    yes_no(e.is_valid()),
                    e.last_modified().unwrap_or("-"),
                    e.change_frequency().unwrap_or("-"),
                    e.priority().unwrap_or("-"),
                    e.loc()
                )?;
            }
        }
        Sitemap::Index(index) => {
            writeln!(out, "{:<6} {:<25} SITEMAP", "VALID", "LASTMOD")?;
            for e in index.sitemaps() {
                writeln!(
                    out,
                    "{:<6} {:<25} {}",
                    yes_no(e.is_valid()),
                    e.last_modified().unwrap_or("-"),
                    e.loc()
                )?;
            }
        }
    }
    Ok(())
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
