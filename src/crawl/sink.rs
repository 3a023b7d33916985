// src/crawl/sink.rs
// =============================================================================
// The single consumer of the result channel.
//
// Each discovery is written and flushed right away, so `jsharvest | httpx`
// style pipelines see URLs as they are found instead of at the end.
//
// Writing to stdout blocks, so the dispatcher runs this on tokio's blocking
// pool (spawn_blocking) rather than on a runtime worker thread.
// =============================================================================

use std::io::{self, Write};
use tokio::sync::mpsc;

use super::Discovery;
use crate::config::OutputFormat;
use crate::error::CrawlError;

// Drains the channel until every worker has dropped its sender.
//
// Returns the number of lines written. On a write error we return early;
// dropping the receiver makes the workers' next send fail, which stops them.
pub(crate) fn drain<W>(
    mut results: mpsc::Receiver<Discovery>,
    mut out: W,
    format: OutputFormat,
) -> Result<usize, CrawlError>
where
    W: Write,
{
    let mut written = 0;

    while let Some(discovery) = results.blocking_recv() {
        write_discovery(&mut out, &discovery, format).map_err(CrawlError::Output)?;
        written += 1;
    }

    Ok(written)
}

fn write_discovery<W: Write>(out: &mut W, discovery: &Discovery, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => writeln!(out, "{}", discovery.url)?,
        OutputFormat::Json => {
            let line = serde_json::to_string(discovery).map_err(io::Error::other)?;
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RefKind;

    fn discovery() -> Discovery {
        Discovery {
            url: "https://ex.com/_next/static/chunks/1.js".to_string(),
            source: "https://ex.com/".to_string(),
            kind: RefKind::BundleChunk,
        }
    }

    #[test]
    fn test_plain_line() {
        let mut out = Vec::new();
        write_discovery(&mut out, &discovery(), OutputFormat::Plain).unwrap();
        assert_eq!(out, b"https://ex.com/_next/static/chunks/1.js\n");
    }

    #[test]
    fn test_json_line() {
        let mut out = Vec::new();
        write_discovery(&mut out, &discovery(), OutputFormat::Json).unwrap();

        let line = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["url"], "https://ex.com/_next/static/chunks/1.js");
        assert_eq!(value["source"], "https://ex.com/");
        assert_eq!(value["kind"], "bundle_chunk");
    }

    #[test]
    fn test_drain_until_closed() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(discovery()).unwrap();
        tx.try_send(discovery()).unwrap();
        drop(tx);

        let mut out = Vec::new();
        let written = drain(rx, &mut out, OutputFormat::Plain).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_drain_on_blocking_pool() {
        let (tx, rx) = mpsc::channel(1);
        let sink = tokio::task::spawn_blocking(move || {
            let mut out = Vec::new();
            let written = drain(rx, &mut out, OutputFormat::Plain)?;
            Ok::<_, CrawlError>((written, out))
        });

        for _ in 0..3 {
            tx.send(discovery()).await.unwrap();
        }
        drop(tx);

        let (written, out) = sink.await.unwrap().unwrap();
        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }
}
