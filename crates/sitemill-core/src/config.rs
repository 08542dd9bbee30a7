use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::ParserConfig;
use crate::sitemap::{MAX_BYTES, MAX_URLS};

/// Output options for the CLI (optional section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

/// Global configuration loaded from `~/.config/sitemill/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemillConfig {
    /// Reject entries outside the sitemap's base URL instead of flagging them.
    pub strict: bool,
    /// Keep the entries read before a markup error instead of failing.
    pub allow_partial: bool,
    /// Maximum entries kept per sitemap.
    pub max_urls: usize,
    /// Maximum sitemap size in bytes (also caps gzip decompression).
    pub max_bytes: usize,
    pub output: Option<OutputConfig>,
}

impl Default for SitemillConfig {
    fn default() -> Self {
        Self {
            strict: true,
            allow_partial: false,
            max_urls: MAX_URLS,
            max_bytes: MAX_BYTES,
            output: None,
        }
    }
}

impl SitemillConfig {
    pub fn pretty_output(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.pretty)
    }
}

impl From<&SitemillConfig> for ParserConfig {
    fn from(cfg: &SitemillConfig) -> Self {
        ParserConfig::default()
            .strict(cfg.strict)
            .allow_partial(cfg.allow_partial)
            .max_urls(cfg.max_urls)
            .max_bytes(cfg.max_bytes)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitemill")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitemillConfig> {
    load_or_init_at(&config_path()?)
}

/// [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SitemillConfig> {
    if !path.exists() {
        let default_cfg = SitemillConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: SitemillConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SitemillConfig::default();
        assert!(cfg.strict);
        assert!(!cfg.allow_partial);
        assert_eq!(cfg.max_urls, 50_000);
        assert_eq!(cfg.max_bytes, 10_485_760);
        assert!(!cfg.pretty_output());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SitemillConfig {
            output: Some(OutputConfig { pretty: true }),
            ..SitemillConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SitemillConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_file_uses_defaults() {
        let toml = r#"
            strict = false
            max_urls = 100

            [output]
            pretty = true
        "#;
        let cfg: SitemillConfig = toml::from_str(toml).unwrap();
        assert!(!cfg.strict);
        assert!(!cfg.allow_partial);
        assert_eq!(cfg.max_urls, 100);
        assert_eq!(cfg.max_bytes, MAX_BYTES);
        assert!(cfg.pretty_output());
    }

    #[test]
    fn parser_config_from_file_config() {
        let cfg = SitemillConfig {
            strict: false,
            allow_partial: true,
            max_urls: 10,
            max_bytes: 2048,
            output: None,
        };
        let pc = ParserConfig::from(&cfg);
        assert!(!pc.strict);
        assert!(pc.allow_partial);
        assert_eq!(pc.max_urls, 10);
        assert_eq!(pc.max_bytes, 2048);
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = load_or_init_at(&path).unwrap();
        assert_eq!(created, SitemillConfig::default());
        assert!(path.exists());

        fs::write(&path, "allow_partial = true\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert!(loaded.allow_partial);
        assert!(loaded.strict);
    }

    #[test]
    fn load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_urls = \"lots\"\n").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }
}
