//! Output module for accumulating crawl results and writing the manifest
//!
//! Workers append per-URL outcomes to a shared [`ReportBuilder`]; the
//! orchestrator finalizes it into an immutable [`CrawlReport`] and serializes
//! the JSON manifest next to the stored pages.

mod manifest;
mod report;

pub use manifest::{write_manifest, Manifest, ManifestEntry, MANIFEST_FILE};
pub use report::{CrawlRecord, CrawlReport, ReportBuilder};
