//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. It provides structured access
//! to user input and handles argument conflicts and defaults.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use readme_gen::config::file::{FileConfig, expand_tilde};
use readme_gen::config::{
    EnhanceOptions, OutputOptions, ScanOptions,
    scan::{DEFAULT_MAX_DEPTH, DEFAULT_TREE_FILES},
};

/// Command-line arguments for controlling directory scanning behavior.
///
/// These options affect how the project tree is traversed and what
/// information is collected during the scanning phase.
#[derive(Parser)]
struct ScanningArgs {
    /// Maximum directory depth to scan
    ///
    /// Limits how deep into the directory tree the scanner will traverse.
    /// Bounding the depth keeps pathological trees (such as symlink cycles)
    /// from being traversed without end.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum number of files rendered in the project-structure tree
    ///
    /// Files beyond this cap are summarized as a single "... and N more
    /// files" line. Purely cosmetic; does not affect detection.
    #[arg(long)]
    tree_files: Option<usize>,

    /// Show access errors that occur while scanning
    ///
    /// When enabled, displays errors encountered while accessing files or
    /// directories during the scanning process. Useful for debugging
    /// permission issues.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Command-line arguments for controlling document output.
#[derive(Parser)]
struct OutputArgs {
    /// Output file path
    ///
    /// Relative paths are resolved against the scanned directory.
    /// Defaults to README.md inside the scanned directory.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Overwrite an existing output file without prompting
    #[arg(short = 'f', long)]
    force: bool,
}

/// Command-line arguments for the AI enhancement step.
#[derive(Parser)]
struct EnhanceArgs {
    /// Enhance the generated README with the Anthropic Messages API
    ///
    /// Requires an API key from the `[enhance]` config section or the
    /// ANTHROPIC_API_KEY environment variable. On any failure the original
    /// document is kept and a warning is printed.
    #[arg(short = 'e', long)]
    enhance: bool,

    /// Model identifier used for enhancement requests
    #[arg(long)]
    model: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// This struct defines the complete command-line interface for the readme-gen
/// tool, combining all argument groups and providing the main entry point for
/// command parsing.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values
/// act as defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "readme-gen")]
#[command(
    about = "Scan a project directory, detect its languages, frameworks, and tooling, and generate a README.md"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory to scan for project metadata
    ///
    /// Defaults to the current directory if not specified.
    #[arg()]
    dir: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress bars,
    /// emojis) is suppressed and a single JSON document is printed to
    /// stdout. Incompatible with `--stdout`.
    #[arg(long)]
    json: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// Enhancement options
    #[command(flatten)]
    enhance: EnhanceArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }

        if let Some(ref dir) = config.dir {
            return expand_tilde(dir);
        }

        PathBuf::from(".")
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **`max_depth`**: CLI > config > 10 (default)
    /// - **`tree_files`**: CLI > config > 50 (default)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            max_depth: self
                .scanning
                .max_depth
                .or(config.scanning.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            tree_files: self
                .scanning
                .tree_files
                .or(config.scanning.tree_files)
                .unwrap_or(DEFAULT_TREE_FILES),
        }
    }

    /// Extract output options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > hardcoded default. The output
    /// path stays `None` when neither source provides one; the caller then
    /// falls back to `README.md` inside the scanned directory.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            path: self
                .output
                .output
                .clone()
                .or_else(|| config.output.path.clone()),
            stdout: self.output.stdout,
            force: self.output.force || config.output.force.unwrap_or(false),
        }
    }

    /// Extract enhancement options from CLI args, config file, and environment.
    ///
    /// The API key is resolved here (config file first, then the
    /// `ANTHROPIC_API_KEY` environment variable) and injected into the
    /// [`EnhanceOptions`] so the enhancer itself never reads ambient state.
    #[must_use]
    pub fn enhance_options(&self, config: &FileConfig) -> EnhanceOptions {
        let api_key = config
            .enhance
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|key| !key.is_empty());

        EnhanceOptions {
            enabled: self.enhance.enhance || config.enhance.enabled.unwrap_or(false),
            api_key,
            model: self
                .enhance
                .model
                .clone()
                .or_else(|| config.enhance.model.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use readme_gen::config::file::{
        FileConfig, FileEnhanceConfig, FileOutputConfig, FileScanConfig,
    };

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["readme-gen"]);
        let config = FileConfig::default();

        assert_eq!(args.directory(&config), PathBuf::from("."));
        assert!(!args.json());

        let scan_opts = args.scan_options(&config);
        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(scan_opts.tree_files, DEFAULT_TREE_FILES);

        let output_opts = args.output_options(&config);
        assert!(output_opts.path.is_none());
        assert!(!output_opts.stdout);
        assert!(!output_opts.force);

        let enhance_opts = args.enhance_options(&config);
        assert!(!enhance_opts.enabled);
        assert!(enhance_opts.model.is_none());
    }

    #[test]
    fn test_custom_directory() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "/custom/path"]);
        assert_eq!(args.directory(&config), PathBuf::from("/custom/path"));
    }

    #[test]
    fn test_scanning_options() {
        let config = FileConfig::default();
        let args = Cli::parse_from([
            "readme-gen",
            "--verbose",
            "--max-depth",
            "3",
            "--tree-files",
            "20",
        ]);
        let scan_opts = args.scan_options(&config);

        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.max_depth, 3);
        assert_eq!(scan_opts.tree_files, 20);
    }

    #[test]
    fn test_output_options() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "-o", "docs/README.md", "--force"]);
        let output_opts = args.output_options(&config);

        assert_eq!(output_opts.path, Some(PathBuf::from("docs/README.md")));
        assert!(output_opts.force);
        assert!(!output_opts.stdout);
    }

    #[test]
    fn test_stdout_flag() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "--stdout"]);
        let output_opts = args.output_options(&config);

        assert!(output_opts.stdout);
    }

    #[test]
    fn test_enhance_flags() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "--enhance", "--model", "claude-test"]);
        let enhance_opts = args.enhance_options(&config);

        assert!(enhance_opts.enabled);
        assert_eq!(enhance_opts.model, Some("claude-test".to_string()));
    }

    #[test]
    fn test_enhance_short_flag() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "-e"]);
        assert!(args.enhance_options(&config).enabled);
    }

    #[test]
    fn test_json_flag() {
        let args = Cli::parse_from(["readme-gen", "--json"]);
        assert!(args.json());
    }

    // ── Config merging tests ───────────────────────────────────────────

    #[test]
    fn test_config_values_used_when_cli_absent() {
        let args = Cli::parse_from(["readme-gen"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/config/dir")),
            scanning: FileScanConfig {
                max_depth: Some(4),
                verbose: Some(true),
                tree_files: Some(15),
            },
            output: FileOutputConfig {
                path: Some(PathBuf::from("OUT.md")),
                force: Some(true),
            },
            enhance: FileEnhanceConfig {
                enabled: Some(true),
                api_key: Some("sk-ant-from-config".to_string()),
                model: Some("claude-config-model".to_string()),
            },
        };

        assert_eq!(args.directory(&config), PathBuf::from("/config/dir"));

        let scan_opts = args.scan_options(&config);
        assert_eq!(scan_opts.max_depth, 4);
        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.tree_files, 15);

        let output_opts = args.output_options(&config);
        assert_eq!(output_opts.path, Some(PathBuf::from("OUT.md")));
        assert!(output_opts.force);

        let enhance_opts = args.enhance_options(&config);
        assert!(enhance_opts.enabled);
        assert_eq!(enhance_opts.api_key, Some("sk-ant-from-config".to_string()));
        assert_eq!(enhance_opts.model, Some("claude-config-model".to_string()));
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let args = Cli::parse_from([
            "readme-gen",
            "/cli/dir",
            "--max-depth",
            "7",
            "-o",
            "CLI.md",
            "--model",
            "claude-cli-model",
        ]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/config/dir")),
            scanning: FileScanConfig {
                max_depth: Some(4),
                ..FileScanConfig::default()
            },
            output: FileOutputConfig {
                path: Some(PathBuf::from("OUT.md")),
                ..FileOutputConfig::default()
            },
            enhance: FileEnhanceConfig {
                model: Some("claude-config-model".to_string()),
                ..FileEnhanceConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.directory(&config), PathBuf::from("/cli/dir"));
        assert_eq!(args.scan_options(&config).max_depth, 7);
        assert_eq!(
            args.output_options(&config).path,
            Some(PathBuf::from("CLI.md"))
        );
        assert_eq!(
            args.enhance_options(&config).model,
            Some("claude-cli-model".to_string())
        );
    }

    #[test]
    fn test_config_api_key_takes_precedence_over_env() {
        let args = Cli::parse_from(["readme-gen"]);
        let config = FileConfig {
            enhance: FileEnhanceConfig {
                api_key: Some("sk-ant-from-config".to_string()),
                ..FileEnhanceConfig::default()
            },
            ..FileConfig::default()
        };

        // Regardless of what the environment holds, the config value wins.
        let enhance_opts = args.enhance_options(&config);
        assert_eq!(enhance_opts.api_key, Some("sk-ant-from-config".to_string()));
    }

    #[test]
    fn test_config_dir_with_tilde_expansion() {
        let args = Cli::parse_from(["readme-gen"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("~/Projects")),
            ..FileConfig::default()
        };

        let dir = args.directory(&config);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(dir, home.join("Projects"));
        }
    }

    #[test]
    fn test_bool_flags_override_config_false() {
        let args = Cli::parse_from(["readme-gen", "--force", "--verbose"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                verbose: Some(false),
                ..FileScanConfig::default()
            },
            output: FileOutputConfig {
                force: Some(false),
                ..FileOutputConfig::default()
            },
            ..FileConfig::default()
        };

        assert!(args.scan_options(&config).verbose);
        assert!(args.output_options(&config).force);
    }

    #[test]
    fn test_zero_values() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["readme-gen", "--max-depth", "0", "--tree-files", "0"]);

        let scan_opts = args.scan_options(&config);
        assert_eq!(scan_opts.max_depth, 0);
        assert_eq!(scan_opts.tree_files, 0);
    }
}
