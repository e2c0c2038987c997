//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/readme-gen/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Default directory to scan when none is given on the command line:
//! # dir = "~/Projects/my-app"
//!
//! [scanning]
//! max_depth = 10
//! verbose = false
//! tree_files = 50
//!
//! [output]
//! path = "README.md"
//! force = false
//!
//! [enhance]
//! enabled = false
//! # api_key = "sk-ant-..."   # falls back to $ANTHROPIC_API_KEY
//! # model = "claude-sonnet-4-20250514"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default directory to scan when none is given on the command line
    pub dir: Option<PathBuf>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,

    /// AI enhancement options
    #[serde(default)]
    pub enhance: FileEnhanceConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Maximum directory depth to scan
    pub max_depth: Option<usize>,

    /// Whether to show access errors encountered during scanning
    pub verbose: Option<bool>,

    /// Maximum number of files rendered in the project-structure tree
    pub tree_files: Option<usize>,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileOutputConfig {
    /// Default output file path, relative to the scanned directory
    pub path: Option<PathBuf>,

    /// Whether to overwrite an existing output file without prompting
    pub force: Option<bool>,
}

/// AI enhancement options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileEnhanceConfig {
    /// Whether to enhance the generated README by default
    pub enabled: Option<bool>,

    /// API key for the Anthropic Messages API.
    /// When absent, the `ANTHROPIC_API_KEY` environment variable is used.
    pub api_key: Option<String>,

    /// Model identifier used for enhancement requests
    pub model: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use readme_gen::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/readme-gen/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux/macOS, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("readme-gen").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    /// If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}
