use serde::Deserialize;

use super::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS};

/// Main configuration structure for Web-Wanderer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent worker tasks
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-page fetch timeout (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Root directory crawl output is written under
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            output_dir: default_output_dir(),
        }
    }
}

impl CrawlerConfig {
    /// Applies command-line overrides. Any `Some` value wins over the file
    /// setting; `None` leaves the file value in place.
    pub fn with_overrides(
        mut self,
        workers: Option<usize>,
        fetch_timeout_ms: Option<u64>,
        output_dir: Option<String>,
    ) -> Self {
        if let Some(workers) = workers {
            self.workers = workers;
        }
        if let Some(fetch_timeout_ms) = fetch_timeout_ms {
            self.fetch_timeout_ms = fetch_timeout_ms;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> CrawlerConfig {
        CrawlerConfig {
            workers: 4,
            fetch_timeout_ms: 5_000,
            output_dir: "./from-file".to_string(),
        }
    }

    #[test]
    fn test_cli_flags_win_over_file_values() {
        let merged = file_config().with_overrides(
            Some(16),
            Some(2_000),
            Some("./from-cli".to_string()),
        );

        assert_eq!(merged.workers, 16);
        assert_eq!(merged.fetch_timeout_ms, 2_000);
        assert_eq!(merged.output_dir, "./from-cli");
    }

    #[test]
    fn test_file_values_apply_when_flags_absent() {
        let merged = file_config().with_overrides(None, None, None);

        assert_eq!(merged.workers, 4);
        assert_eq!(merged.fetch_timeout_ms, 5_000);
        assert_eq!(merged.output_dir, "./from-file");
    }

    #[test]
    fn test_overrides_apply_independently() {
        let merged = file_config().with_overrides(Some(1), None, None);

        assert_eq!(merged.workers, 1);
        assert_eq!(merged.fetch_timeout_ms, 5_000);
        assert_eq!(merged.output_dir, "./from-file");
    }
}
