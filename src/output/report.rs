//! Result accumulation shared between crawl workers

use std::sync::Mutex;
use std::time::Duration;

use crate::url::CanonicalUrl;

/// A successfully fetched and persisted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRecord {
    /// Canonical URL the page was fetched under.
    pub url: CanonicalUrl,
    /// File name the page body was stored as, relative to the crawl directory.
    pub stored_path: String,
}

/// Immutable summary of a finished crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Pages fetched and persisted, in completion order.
    pub successful: Vec<CrawlRecord>,
    /// URLs that failed to fetch or persist, in completion order.
    pub failed: Vec<CanonicalUrl>,
    /// Wall-clock duration of the crawl.
    pub elapsed: Duration,
}

impl CrawlReport {
    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

#[derive(Debug, Default)]
struct ReportInner {
    successful: Vec<CrawlRecord>,
    failed: Vec<CanonicalUrl>,
}

/// Thread-safe accumulator workers record outcomes into.
///
/// Append-only while the crawl runs; [`ReportBuilder::finalize`] drains it
/// into a [`CrawlReport`] once all workers have exited.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    inner: Mutex<ReportInner>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, url: CanonicalUrl, stored_path: String) {
        let mut inner = self.inner.lock().unwrap();
        inner.successful.push(CrawlRecord { url, stored_path });
    }

    pub fn record_failure(&self, url: CanonicalUrl) {
        let mut inner = self.inner.lock().unwrap();
        inner.failed.push(url);
    }

    pub fn success_count(&self) -> usize {
        self.inner.lock().unwrap().successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.inner.lock().unwrap().failed.len()
    }

    /// Drains the accumulated outcomes into an immutable report.
    pub fn finalize(&self, elapsed: Duration) -> CrawlReport {
        let mut inner = self.inner.lock().unwrap();
        let drained = std::mem::take(&mut *inner);
        CrawlReport {
            successful: drained.successful,
            failed: drained.failed,
            elapsed,
        }
    }
}
