//! Web-Wanderer: a breadth-first site downloader
//!
//! This crate crawls a web site starting from a seed URL, fetches every page
//! reachable within the seed's URL prefix, stores the rendered HTML on disk,
//! and records which URLs succeeded or failed in a JSON manifest.

pub mod config;
pub mod crawler;
pub mod frontier;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Web-Wanderer operations
#[derive(Debug, Error)]
pub enum WandererError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no authority (host) component")]
    MissingAuthority,
}

/// Errors raised by the crawl orchestrator
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL failed normalization; fatal, nothing is crawled.
    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed { url: String, source: UrlError },

    #[error("Frontier error: {0}")]
    Frontier(#[from] FrontierError),

    #[error("Worker task failed: {0}")]
    Worker(String),
}

/// Frontier invariant violations. These indicate a programming error and
/// abort the crawl.
#[derive(Debug, Error)]
pub enum FrontierError {
    #[error("Invalid state transition for {url}: {from:?} -> {to:?}")]
    InvalidTransition {
        url: String,
        from: Option<frontier::UrlState>,
        to: frontier::UrlState,
    },
}

/// Result type alias for Web-Wanderer operations
pub type Result<T> = std::result::Result<T, WandererError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOptions, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, Outcome, UrlState};
pub use output::{CrawlRecord, CrawlReport, ReportBuilder};
pub use url::{normalize, resolve, storage_file_name, CanonicalUrl};
