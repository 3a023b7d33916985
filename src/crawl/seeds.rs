// src/crawl/seeds.rs
// =============================================================================
// Reading seed URLs.
//
// Seeds come one per line from a file, or from stdin when no file is given.
// Blank lines are skipped. The reader is consumed lazily: each line is handed
// to a worker as soon as one is free, so a huge (or endless) input never has
// to fit in memory.
// =============================================================================

use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::error::CrawlError;

pub type SeedReader = Box<dyn AsyncBufRead + Unpin + Send>;

// Opens the seed source. This is the one failure that stops a run before
// any request is made.
pub async fn open_seeds(path: Option<&Path>) -> Result<SeedReader, CrawlError> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| CrawlError::InputOpen {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

// Pushes every non-empty line into the work queue.
//
// Lines are read as raw bytes and decoded lossily, so a line with bad UTF-8
// is handed to a worker like any other seed instead of ending the input.
// A read error just ends the input early; it never fails the run.
//
// Returns how many seeds were handed out. Dropping `work` when we return is
// what tells the workers there is nothing more to do.
pub(crate) async fn feed_seeds<R>(mut seeds: R, work: mpsc::Sender<String>) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        match seeds.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::warn!("stopped reading seed URLs: {}", e);
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let seed = line.trim();
        if seed.is_empty() {
            continue;
        }

        if work.send(seed.to_string()).await.is_err() {
            // Every worker is gone (output closed); nothing left to feed.
            log::warn!("workers stopped early, ignoring remaining seed URLs");
            break;
        }
        count += 1;
    }

    count
}
