// src/crawl/dispatcher.rs
// =============================================================================
// This module wires the seed reader, the worker pool and the output sink
// together.
//
//   seeds ──> [work queue] ──> worker 1..N ──> [result queue] ──> sink ──> stdout
//
// Both queues hold a single item, so everyone waits on everyone else:
// the feeder can't run ahead of the workers, and a worker can't run ahead
// of stdout. That keeps memory flat no matter how long the seed list is.
//
// Shutdown happens in order:
// 1. the feeder reaches end of input and drops the work sender
// 2. each worker finishes its current page, sees the closed queue and exits
// 3. the last worker drops the last result sender
// 4. the sink drains what is left and returns
// =============================================================================

use futures::future::join_all;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio::sync::{mpsc, Mutex};

use super::seeds::feed_seeds;
use super::sink;
use super::worker::{Worker, WorkerStats};
use super::{CrawlSummary, Discovery};
use crate::config::{CrawlConfig, OutputFormat};
use crate::error::CrawlError;
use crate::extract::BundleHeuristics;
use crate::fetch::Fetcher;

pub struct Dispatcher {
    fetcher: Arc<dyn Fetcher>,
    heuristics: Arc<BundleHeuristics>,
    workers: usize,
    format: OutputFormat,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CrawlConfig) -> Self {
        Self {
            fetcher,
            heuristics: Arc::new(BundleHeuristics::default()),
            workers: config.workers.max(1),
            format: config.format,
        }
    }

    // Runs the whole crawl.
    //
    // Parameters:
    //   seeds: newline-separated seed URLs
    //   out: where discovered URLs are written (stdout in the binary)
    //
    // Per-URL failures never end up here; only writing the output can fail
    // a run (opening the input is done earlier, by open_seeds).
    pub async fn run<R, W>(&self, seeds: R, out: W) -> Result<CrawlSummary, CrawlError>
    where
        R: AsyncBufRead + Unpin,
        W: Write + Send + 'static,
    {
        let (work_tx, work_rx) = mpsc::channel::<String>(1);
        let (result_tx, result_rx) = mpsc::channel::<Discovery>(1);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let format = self.format;
        let sink = tokio::task::spawn_blocking(move || sink::drain(result_rx, out, format));

        let handles: Vec<_> = (0..self.workers)
            .map(|id| {
                let worker = Worker::new(
                    id,
                    self.fetcher.clone(),
                    self.heuristics.clone(),
                    result_tx.clone(),
                );
                tokio::spawn(worker.run(work_rx.clone()))
            })
            .collect();

        // Only the workers may keep these alive, otherwise shutdown never starts
        drop(result_tx);
        drop(work_rx);

        log::debug!("started {} worker(s)", self.workers);
        let fed = feed_seeds(seeds, work_tx).await;

        let mut summary = CrawlSummary::default();
        for joined in join_all(handles).await {
            match joined {
                Ok(stats) => summary.add(stats),
                Err(e) => log::error!("worker task failed: {}", e),
            }
        }

        let written = sink.await??;
        summary.seeds = fed;

        log::info!(
            "read {} seed URL(s), {} fetch(es) ok, {} failed, {} URL(s) emitted, {} written",
            summary.seeds,
            summary.fetched,
            summary.failed,
            summary.emitted,
            written
        );

        Ok(summary)
    }
}

impl CrawlSummary {
    fn add(&mut self, stats: WorkerStats) {
        self.fetched += stats.fetched;
        self.failed += stats.failed;
        self.emitted += stats.emitted;
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why wrap the work receiver in Arc<Mutex<..>>?
//    - tokio's mpsc channel has exactly one receiver
//    - We have N workers that all want to pull from it
//    - The Mutex lets them take turns; Arc lets them all hold it
//
// 2. Why drop(result_tx) right after spawning?
//    - A channel only closes when every Sender is gone
//    - If we kept our copy, the sink would wait forever
//
// 3. Why spawn_blocking for the sink?
//    - Writing to stdout is plain blocking I/O
//    - On the blocking pool a slow pipe stalls only that thread, not the
//      runtime threads the workers run on
//
// 4. What does sink.await?? do?
//    - The first ? handles the task itself panicking (JoinError)
//    - The second ? handles the sink returning an error (e.g. stdout closed)
// -----------------------------------------------------------------------------
