// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl: a pool of workers that fetch seed pages,
// extract script URLs, expand bundles, and stream the results to one sink.
//
// Submodules:
// - seeds: reading seed URLs from a file or stdin
// - worker: the per-seed fetch -> extract -> emit pipeline
// - sink: writes discoveries to stdout as they arrive
// - dispatcher: owns the queues and the shutdown order
// =============================================================================

mod dispatcher;
mod seeds;
mod sink;
mod worker;

use serde::Serialize;

use crate::extract::RefKind;

pub use dispatcher::Dispatcher;
pub use seeds::open_seeds;

/// One discovered JavaScript URL on its way to the output.
#[derive(Debug, Clone, Serialize)]
pub struct Discovery {
    /// Absolute URL of the script or chunk
    pub url: String,
    /// The seed page it was found from
    pub source: String,
    pub kind: RefKind,
}

/// Totals for a finished crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Non-empty lines read from the input
    pub seeds: usize,
    /// Successful fetches (pages and bundles)
    pub fetched: usize,
    /// Fetches that failed or timed out
    pub failed: usize,
    /// URLs handed to the sink
    pub emitted: usize,
}
