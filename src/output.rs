//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete output of a generation run. When the `--json` flag is passed,
//! these structures are serialized to stdout as a single JSON object,
//! replacing all human-readable output.

use std::collections::BTreeMap;

use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::detector::TechInfo;
use crate::scanner::ScanResult;

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// Name of the scanned project.
    pub project_name: String,

    /// Absolute path to the scanned project root.
    pub root_path: String,

    /// Scan summary statistics.
    pub scan: JsonScanSummary,

    /// Detected technologies.
    pub tech: TechInfo,

    /// The generated (and possibly enhanced) README document.
    pub readme: String,
}

/// Scan statistics in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonScanSummary {
    /// Number of files discovered.
    pub file_count: usize,

    /// Number of directories discovered.
    pub dir_count: usize,

    /// Total size of the discovered files in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size (e.g. `"1.23 MB"`).
    pub total_size_formatted: String,

    /// Unique file extensions observed, with the leading dot.
    pub extensions: Vec<String>,

    /// Special files found under the root (category name → path).
    pub special_files: BTreeMap<String, String>,
}

impl JsonOutput {
    /// Build a `JsonOutput` from the pipeline results.
    #[must_use]
    pub fn from_report(scan: &ScanResult, tech: &TechInfo, readme: &str) -> Self {
        Self {
            project_name: scan.project_name.clone(),
            root_path: scan.root.display().to_string(),
            scan: JsonScanSummary::from_scan(scan),
            tech: tech.clone(),
            readme: readme.to_string(),
        }
    }
}

impl JsonScanSummary {
    /// Compute summary statistics from a scan result.
    #[must_use]
    pub fn from_scan(scan: &ScanResult) -> Self {
        Self {
            file_count: scan.file_count(),
            dir_count: scan.dir_count(),
            total_size: scan.total_size,
            total_size_formatted: format_size(scan.total_size, DECIMAL),
            extensions: scan.extensions.iter().cloned().collect(),
            special_files: scan
                .special_files
                .iter()
                .map(|(category, path)| {
                    (category.as_str().to_string(), path.display().to_string())
                })
                .collect(),
        }
    }
}
