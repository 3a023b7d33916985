// src/config.rs
// =============================================================================
// Settings for one crawl run.
//
// The CLI builds a CrawlConfig once; after that it is read-only and shared by
// the fetcher, the worker pool and the output sink.
// =============================================================================

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// How discovered URLs are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One bare URL per line
    #[default]
    Plain,
    /// One JSON object per line: {"url", "source", "kind"}
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of pages fetched at the same time
    pub workers: usize,
    /// Limit for every single request (pages and bundles alike)
    pub timeout: Duration,
    pub user_agent: Option<String>,
    /// Certificates are never checked; many targets run with broken TLS
    pub accept_invalid_certs: bool,
    pub format: OutputFormat,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            accept_invalid_certs: true,
            format: OutputFormat::Plain,
        }
    }
}

impl CrawlConfig {
    pub fn new(workers: usize, timeout: Duration) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            workers,
            timeout,
            ..Self::default()
        })
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        // An empty --user-agent means "don't send one"
        self.user_agent = user_agent.filter(|ua| !ua.is_empty());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
