// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// jsharvest has no subcommands: it reads seed URLs (file or stdin), crawls
// them, and prints JavaScript URLs. Everything else is a flag.
//
// Example:
//   cat urls.txt | jsharvest -c 20 -t 10
//   jsharvest -i urls.txt --json
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CrawlConfig, OutputFormat, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "jsharvest",
    version,
    about = "Find JavaScript files and bundler chunks referenced by web pages",
    long_about = "jsharvest fetches each seed URL, collects every JavaScript file the page \
                  references (script tags, inline scripts, data-script-src), and expands \
                  webpack / Next.js bundles into the chunk files they load. \
                  Seed URLs are read one per line from --input or stdin."
)]
pub struct Cli {
    /// File with one seed URL per line (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of pages fetched concurrently
    #[arg(short = 'c', long, default_value_t = DEFAULT_WORKERS)]
    pub concurrency: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(short, long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(short, long)]
    pub user_agent: Option<String>,

    /// Print one JSON object per line (url, source page, kind) instead of bare URLs
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<CrawlConfig, ConfigError> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        };

        Ok(CrawlConfig::new(self.concurrency, Duration::from_secs(self.timeout))?
            .with_user_agent(self.user_agent.clone())
            .with_format(format))
    }
}
