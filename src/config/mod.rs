//! Configuration module for Web-Wanderer
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so a config file is optional; CLI
//! flags override whatever the file provides.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig};
pub use validation::validate;

/// Default number of concurrent crawl workers.
pub const DEFAULT_WORKERS: usize = 8;

/// Default per-page fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Default root directory crawl output is written under.
pub const DEFAULT_OUTPUT_DIR: &str = "web-wanderer/downloads";
