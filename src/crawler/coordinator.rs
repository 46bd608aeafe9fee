//! Crawl coordination
//!
//! The [`Coordinator`] owns the frontier, the result accumulator, and a pool
//! of worker tasks. Every worker runs the same loop: take a URL from the
//! frontier, fetch it, store the body, record the outcome, and offer the
//! page's in-scope links back to the frontier. Workers block on the
//! frontier's change notification when the queue is empty, and exit only
//! once no work remains anywhere.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::fetcher::PageFetcher;
use crate::config::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS};
use crate::frontier::{Frontier, Outcome};
use crate::output::{write_manifest, CrawlReport, ReportBuilder};
use crate::url::{normalize, resolve, storage_file_name, CanonicalUrl};
use crate::CrawlError;

/// Tunables for a single crawl.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Number of concurrent worker tasks.
    pub workers: usize,
    /// Per-page fetch timeout.
    pub fetch_timeout: Duration,
    /// Directory pages and the manifest are written into.
    pub output_dir: PathBuf,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// The URL prefix a crawl is confined to.
///
/// Starts as the seed's full canonical string. If the seed itself redirects
/// elsewhere, the scope is re-pointed once at the final URL's authority root
/// so the crawl follows the site it actually landed on.
#[derive(Debug)]
struct SeedScope {
    seed: CanonicalUrl,
    prefix: RwLock<CanonicalUrl>,
    corrected: AtomicBool,
}

impl SeedScope {
    fn new(seed: CanonicalUrl) -> Self {
        Self {
            prefix: RwLock::new(seed.clone()),
            seed,
            corrected: AtomicBool::new(false),
        }
    }

    fn is_seed(&self, url: &CanonicalUrl) -> bool {
        *url == self.seed
    }

    fn in_scope(&self, url: &CanonicalUrl) -> bool {
        url.as_str().starts_with(self.prefix.read().unwrap().as_str())
    }

    /// Re-points the scope at `final_url`'s authority root. Only the first
    /// call has any effect.
    fn correct(&self, final_url: &CanonicalUrl) {
        if self
            .corrected
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let root = final_url.authority_root();
            info!(scope = %root, "seed redirected, crawl scope updated");
            *self.prefix.write().unwrap() = root;
        }
    }
}

/// Orchestrates a breadth-first crawl from a single seed URL.
pub struct Coordinator {
    frontier: Arc<Frontier>,
    scope: Arc<SeedScope>,
    report: Arc<ReportBuilder>,
    fetcher: Arc<dyn PageFetcher>,
    options: CrawlOptions,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Creates a coordinator with the seed already queued.
    ///
    /// Fails with [`CrawlError::InvalidSeed`] if the seed URL cannot be
    /// normalized; nothing is crawled in that case.
    pub fn new(
        seed: &str,
        options: CrawlOptions,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, CrawlError> {
        let seed = normalize(seed).map_err(|source| CrawlError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;

        let frontier = Arc::new(Frontier::new());
        frontier.offer(seed.clone());

        Ok(Self {
            frontier,
            scope: Arc::new(SeedScope::new(seed)),
            report: Arc::new(ReportBuilder::new()),
            fetcher,
            options,
        })
    }

    /// Runs the crawl to completion and returns the final report.
    ///
    /// The worker pool is spawned, and once every worker has exited the
    /// manifest is written next to the stored pages. The output directory
    /// must already exist; the CLI layer creates it.
    pub async fn run(&self) -> crate::Result<CrawlReport> {
        info!(
            seed = %self.scope.seed,
            workers = self.options.workers,
            output_dir = %self.options.output_dir.display(),
            "starting crawl"
        );
        let started = Instant::now();

        let mut workers = JoinSet::new();
        for id in 0..self.options.workers.max(1) {
            let worker = Worker {
                id,
                frontier: Arc::clone(&self.frontier),
                scope: Arc::clone(&self.scope),
                report: Arc::clone(&self.report),
                fetcher: Arc::clone(&self.fetcher),
                fetch_timeout: self.options.fetch_timeout,
                output_dir: self.options.output_dir.clone(),
            };
            workers.spawn(worker.run());
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(result) => result.map_err(CrawlError::from)?,
                Err(err) => return Err(CrawlError::Worker(err.to_string()).into()),
            }
        }

        let report = self.report.finalize(started.elapsed());
        let manifest_path = write_manifest(&report, &self.options.output_dir).await?;

        if report.failure_count() > 0 {
            warn!(failed = report.failure_count(), "some pages could not be fetched");
        }
        info!(
            successful = report.success_count(),
            failed = report.failure_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            manifest = %manifest_path.display(),
            "crawl finished"
        );

        Ok(report)
    }
}

struct Worker {
    id: usize,
    frontier: Arc<Frontier>,
    scope: Arc<SeedScope>,
    report: Arc<ReportBuilder>,
    fetcher: Arc<dyn PageFetcher>,
    fetch_timeout: Duration,
    output_dir: PathBuf,
}

impl Worker {
    async fn run(self) -> Result<(), crate::FrontierError> {
        loop {
            match self.frontier.take() {
                Some(url) => self.process_url(url).await?,
                None => {
                    if !self.frontier.pending_work() {
                        break;
                    }
                    // Another worker may still discover links; sleep until
                    // the frontier changes, then re-check.
                    self.frontier.wait_for_change().await;
                }
            }
        }

        debug!(worker = self.id, "worker exiting");
        Ok(())
    }

    async fn process_url(&self, url: CanonicalUrl) -> Result<(), crate::FrontierError> {
        debug!(worker = self.id, url = %url, "fetching");

        let page = match self.fetcher.fetch(&url, self.fetch_timeout).await {
            Ok(page) => page,
            Err(err) => {
                warn!(url = %url, error = %err, "fetch failed");
                self.report.record_failure(url.clone());
                return self.frontier.complete(&url, Outcome::Failed);
            }
        };

        let final_url = match normalize(&page.final_url) {
            Ok(final_url) => final_url,
            Err(err) => {
                warn!(url = %url, final_url = %page.final_url, error = %err, "unusable final URL");
                self.report.record_failure(url.clone());
                return self.frontier.complete(&url, Outcome::Failed);
            }
        };

        // Redirect policy. The page is persisted under its final URL, so a
        // redirect target must either be claimed (marking it visited without
        // a second fetch) or, if it is already known or out of scope, the
        // page is discarded as a duplicate of already-processed work.
        let claimed_redirect = if final_url != url {
            if self.scope.is_seed(&url) {
                // A redirecting seed re-points the scope before anything is
                // judged against it.
                self.scope.correct(&final_url);
                self.frontier.claim(final_url.clone())
            } else if !self.scope.in_scope(&final_url) {
                debug!(url = %url, final_url = %final_url, "redirected out of scope, page discarded");
                return self.frontier.complete(&url, Outcome::Succeeded);
            } else if self.frontier.claim(final_url.clone()) {
                true
            } else {
                debug!(url = %url, final_url = %final_url, "redirect target already known, page discarded");
                return self.frontier.complete(&url, Outcome::Succeeded);
            }
        } else {
            false
        };

        let file_name = format!("{}.html", storage_file_name(&final_url, false));
        let path = self.output_dir.join(&file_name);
        if let Err(err) = tokio::fs::write(&path, &page.html).await {
            warn!(url = %url, path = %path.display(), error = %err, "failed to store page");
            self.report.record_failure(url.clone());
            self.frontier.complete(&url, Outcome::Failed)?;
            if claimed_redirect {
                self.report.record_failure(final_url.clone());
                self.frontier.complete(&final_url, Outcome::Failed)?;
            }
            return Ok(());
        }

        self.report.record_success(final_url.clone(), file_name.clone());
        self.frontier.complete(&url, Outcome::Succeeded)?;
        if claimed_redirect {
            self.frontier.complete(&final_url, Outcome::Succeeded)?;
        }
        info!(url = %final_url, file = %file_name, "page stored");

        let mut offered = 0usize;
        for href in &page.hrefs {
            let resolved = match resolve(href, &final_url) {
                Ok(resolved) => resolved,
                Err(_) => continue,
            };
            let candidate = match normalize(&resolved) {
                Ok(candidate) => candidate,
                Err(_) => continue,
            };
            if !self.scope.in_scope(&candidate) {
                continue;
            }
            if self.frontier.offer(candidate) {
                offered += 1;
            }
        }
        debug!(
            worker = self.id,
            url = %url,
            links = page.hrefs.len(),
            offered,
            "links extracted"
        );

        Ok(())
    }
}
