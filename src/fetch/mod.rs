// src/fetch/mod.rs
// =============================================================================
// This module downloads pages and bundles.
//
// The crawler only ever talks to the `Fetcher` trait, so tests (or another
// HTTP stack) can plug in their own implementation. The production one
// lives in http.rs.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::ReqwestFetcher;

/// Downloads one URL with a single GET and returns the raw body.
///
/// No retries: a failed fetch is reported once and the caller moves on.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
