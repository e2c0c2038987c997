//! Output and enhancement configuration.
//!
//! This module defines the options that control where the generated document
//! goes and whether the AI enhancement step runs.

use std::path::PathBuf;

/// Configuration for document output behavior.
#[derive(Clone, Debug)]
pub struct OutputOptions {
    /// Output file path. When `None`, the document is written to
    /// `README.md` inside the scanned directory.
    pub path: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    pub stdout: bool,

    /// Overwrite an existing output file without prompting
    pub force: bool,
}

/// Configuration for the AI enhancement step.
///
/// The API key is resolved by the caller (config file, then the
/// `ANTHROPIC_API_KEY` environment variable) and injected here so the
/// enhancer itself never reads ambient process state.
#[derive(Clone, Debug)]
pub struct EnhanceOptions {
    /// Whether enhancement was requested
    pub enabled: bool,

    /// API key for the Anthropic Messages API, if one was found
    pub api_key: Option<String>,

    /// Model identifier override. When `None`, the enhancer default is used.
    pub model: Option<String>,
}
