// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Only two kinds of errors ever reach the user:
// - ConfigError: bad command-line values (e.g. --concurrency 0)
// - CrawlError: the input file can't be opened, or stdout went away
//
// FetchError is for a single URL. The crawler logs it at debug level and
// moves on, so it never stops a run.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Invalid crawl settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Failure fetching one URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be turned into a request
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection failure, timeout, TLS failure, ...
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered but the body could not be read
    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Transport { source, .. } | FetchError::Body { source, .. } => {
                source.is_timeout()
            }
            FetchError::InvalidUrl { .. } => false,
        }
    }
}

/// Errors that abort a whole crawl.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("could not open input file {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("output task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
