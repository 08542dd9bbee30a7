//! CLI for the sitemill sitemap parser.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use sitemill_core::config;

use commands::{run_check_url, run_completions, run_detect, run_parse, ParseOptions};

/// Top-level CLI for sitemill.
#[derive(Debug, Parser)]
#[command(name = "sitemill")]
#[command(about = "sitemill: sitemap detection and parsing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a sitemap file and list its entries.
    Parse {
        /// Path to the sitemap (text, XML, or gzip-compressed XML).
        path: PathBuf,

        /// URL the sitemap was fetched from; entries are checked against its directory.
        /// Defaults to the file's own file:// URL.
        #[arg(long)]
        url: Option<String>,

        /// Declared content type (e.g. "application/xml"). Sniffed when omitted.
        #[arg(long, value_name = "TYPE")]
        content_type: Option<String>,

        /// Keep entries outside the base URL, flagged as invalid.
        #[arg(long)]
        lenient: bool,

        /// Return the entries read before a markup error instead of failing.
        #[arg(long)]
        allow_partial: bool,

        /// Print the document as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the sniffed content type and document family of a file.
    Detect {
        /// Path to the file.
        path: PathBuf,
    },

    /// Check whether a URL lies under a base URL (exit status 0 if it does).
    CheckUrl {
        /// Base URL, usually a sitemap's directory.
        base: String,
        /// URL to check.
        candidate: String,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Parse {
                path,
                url,
                content_type,
                lenient,
                allow_partial,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = ParseOptions {
                    path,
                    url,
                    content_type,
                    lenient,
                    allow_partial,
                    json,
                };
                run_parse(&cfg, &opts)?;
            }
            CliCommand::Detect { path } => run_detect(&path)?,
            CliCommand::CheckUrl { base, candidate } => {
                if !run_check_url(&base, &candidate) {
                    return Ok(ExitCode::FAILURE);
                }
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests;
