//! JSON manifest written alongside the stored pages

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::CrawlReport;

/// File name of the manifest inside the crawl directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One successfully stored page in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub url: String,
    pub path: String,
}

/// Serialized form of a [`CrawlReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub successful: Vec<ManifestEntry>,
    pub failed: Vec<String>,
    pub elapsed_seconds: f64,
}

impl From<&CrawlReport> for Manifest {
    fn from(report: &CrawlReport) -> Self {
        Manifest {
            successful: report
                .successful
                .iter()
                .map(|record| ManifestEntry {
                    url: record.url.as_str().to_string(),
                    path: record.stored_path.clone(),
                })
                .collect(),
            failed: report.failed.iter().map(|url| url.as_str().to_string()).collect(),
            elapsed_seconds: report.elapsed.as_secs_f64(),
        }
    }
}

/// Writes the manifest for `report` into `crawl_dir`, returning its path.
pub async fn write_manifest(report: &CrawlReport, crawl_dir: &Path) -> io::Result<PathBuf> {
    let manifest = Manifest::from(report);
    let json = serde_json::to_string_pretty(&manifest)?;
    let path = crawl_dir.join(MANIFEST_FILE);
    tokio::fs::write(&path, json).await?;
    Ok(path)
}
