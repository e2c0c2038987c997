//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how directories are scanned
//! and what information is collected during the scanning process.

/// Default maximum recursion depth for directory traversal.
///
/// Bounding the depth keeps pathological trees (e.g. symlink cycles) from
/// being traversed without end.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default maximum number of files rendered in the project-structure tree.
pub const DEFAULT_TREE_FILES: usize = 50;

/// Configuration for directory scanning behavior.
///
/// This struct contains options that control how directories are traversed
/// and what information is collected during the scanning process.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Whether to show verbose output including scan errors
    pub verbose: bool,

    /// Maximum directory depth to scan
    pub max_depth: usize,

    /// Maximum number of files rendered in the file tree
    pub tree_files: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            max_depth: DEFAULT_MAX_DEPTH,
            tree_files: DEFAULT_TREE_FILES,
        }
    }
}
