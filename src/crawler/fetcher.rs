//! Page fetching
//!
//! Defines the [`PageFetcher`] contract the coordinator crawls through, plus
//! the reqwest-backed [`HttpFetcher`] used in production. The coordinator
//! never touches HTTP directly, so tests can drive it with scripted fetchers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use thiserror::Error;

use super::parser::extract_hrefs;
use crate::url::CanonicalUrl;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("web-wanderer/", env!("CARGO_PKG_VERSION"));

/// Why a fetch failed. Any variant marks the URL as failed; the crawl
/// itself continues.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The page did not finish loading within the configured timeout.
    #[error("timed out waiting for page")]
    Timeout,

    /// Connection, TLS, DNS, or redirect-chain failure.
    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    /// The server answered with an error status (4xx or 5xx).
    #[error("http status {0}")]
    HttpStatus(u16),
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the page was ultimately served from, after redirects.
    pub final_url: String,
    /// Raw response body.
    pub html: String,
    /// Raw hrefs discovered in the body, unresolved.
    pub hrefs: Vec<String>,
}

/// Contract between the coordinator and whatever retrieves pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, following redirects, within `timeout`.
    async fn fetch(
        &self,
        url: &CanonicalUrl,
        timeout: Duration,
    ) -> Result<FetchedPage, FetchError>;
}

/// Builds the HTTP client shared by all workers.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &CanonicalUrl,
        timeout: Duration,
    ) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(classify_request_error)?;
        let hrefs = extract_hrefs(&html);

        Ok(FetchedPage {
            final_url,
            html,
            hrefs,
        })
    }
}

fn classify_request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::NavigationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_fetch_success_extracts_hrefs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><a href="/next">next</a></body></html>"#,
            ))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = normalize(&server.uri()).unwrap();
        let page = fetcher.fetch(&url, TIMEOUT).await.unwrap();

        assert!(page.final_url.starts_with(&server.uri()));
        assert!(page.html.contains("next"));
        assert_eq!(page.hrefs, vec!["/next"]);
    }

    #[tokio::test]
    async fn test_fetch_error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = normalize(&format!("{}/missing", server.uri())).unwrap();
        let err = fetcher.fetch(&url, TIMEOUT).await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", "/new"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = normalize(&format!("{}/old", server.uri())).unwrap();
        let page = fetcher.fetch(&url, TIMEOUT).await.unwrap();

        assert!(page.final_url.ends_with("/new"));
        assert_eq!(page.html, "moved");
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = normalize(&format!("{}/slow", server.uri())).unwrap();
        let err = fetcher
            .fetch(&url, Duration::from_millis(100))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let fetcher = HttpFetcher::new().unwrap();
        // Reserved TEST-NET-1 address, nothing listens there.
        let url = normalize("http://192.0.2.1:9/").unwrap();
        let err = fetcher
            .fetch(&url, Duration::from_millis(500))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Timeout | FetchError::NavigationFailed(_)
        ));
    }
}
