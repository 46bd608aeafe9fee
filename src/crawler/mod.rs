//! Crawl orchestration
//!
//! The crawler module glues the frontier, fetcher, and output layers
//! together:
//! - `fetcher` defines the [`PageFetcher`] contract and the HTTP-backed
//!   implementation used in production
//! - `parser` extracts candidate hrefs from fetched HTML
//! - `coordinator` runs the worker pool and enforces the per-URL protocol

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlOptions};
pub use fetcher::{
    build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher,
};
pub use parser::extract_hrefs;
