//! Configuration types for the application.
//!
//! This module groups the option structs consumed by the pipeline stages and
//! the persistent TOML configuration file. Config-file values act as defaults
//! that CLI arguments can override; the resolution helpers live on the
//! binary's `Cli` type.

pub mod file;
pub mod output;
pub mod scan;

pub use file::FileConfig;
pub use output::{EnhanceOptions, OutputOptions};
pub use scan::ScanOptions;
