//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end: fetching, link discovery, dedup,
//! storage, and the manifest.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use web_wanderer::output::{Manifest, MANIFEST_FILE};
use web_wanderer::{Coordinator, CrawlOptions, CrawlReport, HttpFetcher};

fn html_page(links: &[&str]) -> String {
    let body: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    format!("<html><body>{body}</body></html>")
}

async fn mount_page(server: &MockServer, route: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(links))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn run_crawl(seed: &str, output_dir: &std::path::Path) -> CrawlReport {
    let options = CrawlOptions {
        workers: 4,
        fetch_timeout: Duration::from_secs(5),
        output_dir: output_dir.to_path_buf(),
    };
    let fetcher = Arc::new(HttpFetcher::new().expect("Failed to build fetcher"));
    let coordinator = Coordinator::new(seed, options, fetcher).expect("Invalid seed");
    coordinator.run().await.expect("Crawl failed")
}

#[tokio::test]
async fn test_full_site_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/a", &["/b"]).await;
    mount_page(&server, "/b", &[]).await;

    let dir = tempfile::tempdir().unwrap();
    let report = run_crawl(&server.uri(), dir.path()).await;

    assert_eq!(report.success_count(), 3);
    assert_eq!(report.failure_count(), 0);

    // Every page body landed on disk next to the manifest.
    for record in &report.successful {
        let stored = dir.path().join(&record.stored_path);
        assert!(stored.exists(), "missing stored page: {}", record.stored_path);
        let body = std::fs::read_to_string(&stored).unwrap();
        assert!(body.contains("<html>"));
    }
}

#[tokio::test]
async fn test_equivalent_urls_fetched_once() {
    let server = MockServer::start().await;
    // Three spellings of the same page; the crawler must request it once.
    mount_page(&server, "/", &["/page", "/page/", "/page#section"]).await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(&[]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report = run_crawl(&server.uri(), dir.path()).await;

    assert_eq!(report.success_count(), 2);
    server.verify().await;
}

#[tokio::test]
async fn test_failed_page_is_reported() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/missing", "/good"]).await;
    mount_page(&server, "/good", &[]).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report = run_crawl(&server.uri(), dir.path()).await;

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);
    assert!(report.failed[0].as_str().ends_with("/missing"));
}

#[tokio::test]
async fn test_seed_redirect_widens_scope() {
    let server = MockServer::start().await;

    // The seed redirects to /home; /about is outside the original seed
    // prefix and only reachable once the scope follows the redirect.
    Mock::given(method("GET"))
        .and(path("/docs/intro"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "/home"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(&["/about"]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/about", &[]).await;

    let dir = tempfile::tempdir().unwrap();
    let seed = format!("{}/docs/intro", server.uri());
    let report = run_crawl(&seed, dir.path()).await;

    // Records are keyed by final URL: /home (via the seed) and /about.
    assert_eq!(report.success_count(), 2);
    assert!(report
        .successful
        .iter()
        .any(|record| record.url.as_str().ends_with("/home")));
    // /home was served once via the redirect, never re-fetched directly.
    server.verify().await;
}

#[tokio::test]
async fn test_manifest_reflects_report() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/ok", "/bad"]).await;
    mount_page(&server, "/ok", &[]).await;

    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report = run_crawl(&server.uri(), dir.path()).await;

    let raw = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
    let manifest: Manifest = serde_json::from_str(&raw).unwrap();

    assert_eq!(manifest.successful.len(), report.success_count());
    assert_eq!(manifest.failed.len(), 1);
    assert!(manifest.failed[0].ends_with("/bad"));
    assert!(manifest.elapsed_seconds >= 0.0);

    for entry in &manifest.successful {
        assert!(entry.path.ends_with(".html"));
        assert!(dir.path().join(&entry.path).exists());
    }
}
