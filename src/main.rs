// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn them into a CrawlConfig and build the HTTP fetcher
// 3. Open the seed source (file or stdin)
// 4. Run the crawl, streaming URLs to stdout
// 5. Exit with proper code (0 = success, 2 = error)
//
// A run where some (or all) URLs fail to load still exits 0. Only bad
// arguments or an unreadable input file are errors.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - crawl settings
mod crawl;         // src/crawl/ - worker pool, seed feeding, output
mod error;         // src/error.rs - error types
mod extract;       // src/extract/ - HTML / bundle extraction and URL resolution
mod fetch;         // src/fetch/ - HTTP fetching
mod logging;       // src/logging.rs - env_logger setup

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use cli::Cli;
use crawl::Dispatcher;
use fetch::ReqwestFetcher;

#[tokio::main]
async fn main() {
    logging::init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config().context("invalid arguments")?;

    let fetcher = ReqwestFetcher::new(&config).context("could not build HTTP client")?;

    // Fail before any request if the input file is missing
    let seeds = crawl::open_seeds(cli.input.as_deref()).await?;

    let summary = Dispatcher::new(Arc::new(fetcher), &config)
        .run(seeds, std::io::stdout())
        .await?;

    log::debug!("{:?}", summary);
    Ok(())
}
