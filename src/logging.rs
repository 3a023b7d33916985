// src/logging.rs
// =============================================================================
// Logger setup.
//
// Logs go to stderr so stdout stays a clean list of URLs. The level comes
// from RUST_LOG (default: warn), e.g.
//
//   RUST_LOG=debug jsharvest -i urls.txt      # see every failed fetch
//   RUST_LOG=jsharvest=trace jsharvest ...    # also per-extractor counts
// =============================================================================

use log::LevelFilter;

pub fn init() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    // HTML parsing and HTTP internals are chatty below warn
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);

    // Only fails if a logger is already set, which is harmless
    let _ = builder.try_init();
}
