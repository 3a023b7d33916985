// src/fetch/http.rs
// =============================================================================
// The real fetcher, built on reqwest.
//
// One Client is created per run and shared by every worker (reqwest clients
// are cheap to clone and pool their connections internally).
//
// Settings come from CrawlConfig:
// - a timeout that covers the whole request, including reading the body
// - an optional User-Agent header
// - TLS certificate checks turned off
//
// Any status code is accepted. Error pages and soft-404s still carry the
// site's <script> tags, so we hand their body to the extractor too.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;

use super::Fetcher;
use crate::config::CrawlConfig;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    // Builds the shared HTTP client.
    //
    // Fails only if reqwest can't set up its TLS backend.
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            log::debug!("{} answered HTTP {}", url, response.status().as_u16());
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(timeout: Duration) -> CrawlConfig {
        CrawlConfig::new(1, timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let fetcher = ReqwestFetcher::new(&config(Duration::from_secs(5))).unwrap();
        let body = fetcher
            .fetch(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, b"<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ua"))
            .and(header("user-agent", "jsharvest-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("matched"))
            .mount(&server)
            .await;

        let config =
            config(Duration::from_secs(5)).with_user_agent(Some("jsharvest-test".to_string()));
        let fetcher = ReqwestFetcher::new(&config).unwrap();
        let body = fetcher.fetch(&format!("{}/ua", server.uri())).await.unwrap();
        assert_eq!(body, b"matched");
    }

    #[tokio::test]
    async fn test_fetch_keeps_error_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<script src=\"/a.js\"></script>"))
            .mount(&server)
            .await;

        let fetcher = ReqwestFetcher::new(&config(Duration::from_secs(5))).unwrap();
        let body = fetcher
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, b"<script src=\"/a.js\"></script>");
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = ReqwestFetcher::new(&config(Duration::from_millis(200))).unwrap();
        let err = fetcher
            .fetch(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err}");
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = ReqwestFetcher::new(&config(Duration::from_secs(1))).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
