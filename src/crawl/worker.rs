// src/crawl/worker.rs
// =============================================================================
// One worker of the crawl pool.
//
// For every seed URL it pulls from the shared queue:
// 1. Fetch the page
// 2. Extract script references (src, inline text, data-script-src)
// 3. Emit each new URL to the sink
// 4. If a script looks like a bundle, fetch it right away and emit its chunks
//    before moving on to the next reference
//
// Each worker keeps its own `seen` set. A URL is fetched or emitted at most
// once per worker, but two workers may both report the same URL.
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use url::Url;

use super::Discovery;
use crate::extract::{extract_page_scripts, BundleDocument, BundleHeuristics, RefKind};
use crate::fetch::Fetcher;

/// The sink has gone away; there is no point continuing.
#[derive(Debug)]
pub(crate) struct SinkClosed;

/// Counters for one worker, summed into the crawl summary.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerStats {
    pub fetched: usize,
    pub failed: usize,
    pub emitted: usize,
}

pub(crate) type WorkQueue = Arc<Mutex<mpsc::Receiver<String>>>;

pub(crate) struct Worker {
    id: usize,
    fetcher: Arc<dyn Fetcher>,
    heuristics: Arc<BundleHeuristics>,
    results: mpsc::Sender<Discovery>,
    seen: HashSet<String>,
    stats: WorkerStats,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        fetcher: Arc<dyn Fetcher>,
        heuristics: Arc<BundleHeuristics>,
        results: mpsc::Sender<Discovery>,
    ) -> Self {
        Self {
            id,
            fetcher,
            heuristics,
            results,
            seen: HashSet::new(),
            stats: WorkerStats::default(),
        }
    }

    // Pulls seeds until the queue is closed (or the sink goes away).
    pub(crate) async fn run(mut self, queue: WorkQueue) -> WorkerStats {
        loop {
            // The lock is released as soon as a seed (or None) comes back
            let next = queue.lock().await.recv().await;
            let Some(seed) = next else {
                break;
            };

            if self.process_seed(seed).await.is_err() {
                log::debug!("worker {}: output closed, stopping", self.id);
                break;
            }
        }

        self.stats
    }

    async fn process_seed(&mut self, seed: String) -> Result<(), SinkClosed> {
        if !self.seen.insert(seed.clone()) {
            log::debug!("worker {}: already crawled {}", self.id, seed);
            return Ok(());
        }

        let page_url = match Url::parse(&seed) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("skipping invalid seed URL '{}': {}", seed, e);
                return Ok(());
            }
        };

        let Some(body) = self.fetch(&seed).await else {
            return Ok(());
        };

        // Parse and drop the DOM before the first await below
        let refs = extract_page_scripts(&String::from_utf8_lossy(&body), &page_url);

        for script in refs {
            if !self.seen.insert(script.url.clone()) {
                continue;
            }

            self.emit(&script.url, &seed, script.kind).await?;

            if script.follow_bundle {
                self.expand_bundle(&script.url, &seed).await?;
            }
        }

        Ok(())
    }

    // Downloads a bundle and emits every chunk URL the heuristics find in it.
    //
    // Chunks are not crawled further: one level of expansion only.
    // If the bundle can't be fetched we return Ok and the caller keeps going
    // with the rest of the page, including the inline text of the same
    // <script> element. A failed bundle never hides that text.
    async fn expand_bundle(&mut self, bundle_url: &str, source: &str) -> Result<(), SinkClosed> {
        let Some(body) = self.fetch(bundle_url).await else {
            return Ok(());
        };

        let bundle = match BundleDocument::new(bundle_url, String::from_utf8_lossy(&body)) {
            Ok(bundle) => bundle,
            Err(e) => {
                log::debug!("skipping bundle with invalid URL '{}': {}", bundle_url, e);
                return Ok(());
            }
        };

        let chunks = self.heuristics.chunk_urls(&bundle);
        log::debug!("{} chunk(s) found in {}", chunks.len(), bundle_url);

        for chunk in chunks {
            if self.seen.insert(chunk.clone()) {
                self.emit(&chunk, source, RefKind::BundleChunk).await?;
            }
        }

        Ok(())
    }

    async fn fetch(&mut self, url: &str) -> Option<Vec<u8>> {
        match self.fetcher.fetch(url).await {
            Ok(body) => {
                self.stats.fetched += 1;
                Some(body)
            }
            Err(e) => {
                self.stats.failed += 1;
                if e.is_timeout() {
                    log::debug!("worker {}: timed out fetching {}", self.id, url);
                } else {
                    log::debug!("worker {}: {}", self.id, e);
                }
                None
            }
        }
    }

    async fn emit(&mut self, url: &str, source: &str, kind: RefKind) -> Result<(), SinkClosed> {
        let discovery = Discovery {
            url: url.to_string(),
            source: source.to_string(),
            kind,
        };

        // Blocks until the sink has room, which throttles the whole crawl
        self.results.send(discovery).await.map_err(|_| SinkClosed)?;
        self.stats.emitted += 1;
        Ok(())
    }
}
