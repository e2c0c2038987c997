//! # readme-gen
//!
//! A CLI tool that scans a project directory, detects the languages,
//! frameworks, package managers, and tooling it uses, and generates a
//! polished README.md from that analysis.
//!
//! The pipeline is strictly one-directional: the filesystem is scanned once,
//! technologies are derived from the scan, the document is rendered from
//! both, and an optional AI enhancement step may rewrite the document as a
//! whole. Detection is best-effort: unreadable directories and unparseable
//! manifests degrade coverage, never the run.
//!
//! ## Usage
//!
//! ```bash
//! # Generate README.md for the current directory
//! readme-gen
//!
//! # Scan another project and print to stdout
//! readme-gen ~/Projects/my-app --stdout
//!
//! # Enhance the result with the Anthropic API
//! readme-gen --enhance
//! ```

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use humansize::{DECIMAL, format_size};
use inquire::Confirm;
use readme_gen::{
    Enhancer, Generator, ScanResult, Scanner, TechDetector, TechInfo, config::FileConfig,
    output::JsonOutput,
};
use std::process::exit;

/// Entry point for the readme-gen application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, scan the
/// project directory, detect technologies, render the document, optionally
/// enhance it, and emit the result as a file, stdout text, or JSON.
///
/// # Errors
///
/// Returns errors from argument conflicts, directory scanning, enhancer
/// construction, file-system operations, or JSON serialization. Failures of
/// the enhancement call itself are not errors; they fall back to the
/// unenhanced document.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let dir = args.directory(&file_config);
    let scan_options = args.scan_options(&file_config);
    let output_options = args.output_options(&file_config);
    let enhance_options = args.enhance_options(&file_config);

    if json_mode && output_options.stdout {
        bail!("--json and --stdout cannot be used together");
    }

    let scanner = Scanner::new(scan_options).with_quiet(json_mode);
    let scan = scanner.scan(&dir)?;

    if !json_mode {
        print_scan_summary(&scan);
    }

    let tech = TechDetector::new(&scan).detect();

    if !json_mode {
        print_tech_summary(&tech);
    }

    let mut readme = Generator::new(&scan, &tech).generate();

    if enhance_options.enabled {
        let enhancer = Enhancer::new(&enhance_options)?;
        if !json_mode {
            println!("{}", "🤖 Enhancing README with AI...".cyan());
        }
        readme = enhancer.enhance(&readme, &scan, &tech);
    }

    if json_mode {
        let output = JsonOutput::from_report(&scan, &tech, &readme);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output_options.stdout {
        println!("{readme}");
        return Ok(());
    }

    let path = resolve_output_path(output_options.path.as_deref(), &scan.root);
    write_document(&path, &readme, output_options.force)
}

// ── Helper functions ────────────────────────────────────────────────────

/// Print the post-scan summary line.
fn print_scan_summary(scan: &ScanResult) {
    println!(
        "Found {} files in {} directories ({})",
        scan.file_count(),
        scan.dir_count(),
        format_size(scan.total_size, DECIMAL)
    );
}

/// Print the detected technologies.
fn print_tech_summary(tech: &TechInfo) {
    println!(
        "\n{} {}",
        "🔍 Primary language:".bold(),
        tech.primary_language
    );

    if !tech.frameworks.is_empty() {
        println!("   Frameworks: {}", tech.frameworks.join(", "));
    }

    if !tech.package_managers.is_empty() {
        println!("   Package managers: {}", tech.package_managers.join(", "));
    }

    if !tech.tools.is_empty() {
        println!("   Tools: {}", tech.tools.join(", "));
    }
}

/// Resolve the output file path.
///
/// Absolute paths are used as given; relative paths are resolved against the
/// scanned directory. When no path was configured the document goes to
/// `README.md` inside the scanned directory.
fn resolve_output_path(configured: Option<&Path>, root: &Path) -> PathBuf {
    match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join("README.md"),
    }
}

/// Write the document, prompting before overwriting an existing file.
///
/// The prompt is skipped with `--force`. Declining the prompt aborts the
/// write without an error.
fn write_document(path: &Path, readme: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        let overwrite = Confirm::new(&format!("{} already exists. Overwrite?", path.display()))
            .with_default(false)
            .prompt()?;

        if !overwrite {
            println!("{}", "✨ Aborted; existing file left untouched.".yellow());
            return Ok(());
        }
    }

    let content = format!("{readme}\n");
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "\n{} {}",
        "✅ README generated!".green(),
        format!(
            "Wrote {} ({})",
            path.display(),
            format_size(content.len(), DECIMAL)
        )
        .bright_white()
    );

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# readme-gen configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to scan (defaults to current directory when not set)
# dir = "."

[scanning]
# Maximum directory depth to scan
# max_depth = 10

# Show access errors encountered during scanning
# verbose = false

# Maximum number of files rendered in the project-structure tree
# tree_files = 50

[output]
# Output file path, relative to the scanned directory
# path = "README.md"

# Overwrite an existing output file without prompting
# force = false

[enhance]
# Enhance the generated README with the Anthropic Messages API
# enabled = false

# API key (falls back to the ANTHROPIC_API_KEY environment variable)
# api_key = ""

# Model used for enhancement requests
# model = "claude-sonnet-4-20250514"
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: usize) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_path(val: Option<&std::path::Path>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |p| format!("\"{}\"", p.display()),
        )
    }

    let api_key = config.enhance.api_key.as_ref().map_or_else(
        || "(unset - using $ANTHROPIC_API_KEY)".to_string(),
        |_| "(set)".to_string(),
    );
    let model = config.enhance.model.as_deref().map_or_else(
        || format!("\"{}\"  (default)", readme_gen::enhancer::DEFAULT_MODEL),
        |m| format!("\"{m}\""),
    );

    format!(
        "\
dir        = {dir}

[scanning]
max_depth  = {max_depth}
verbose    = {verbose}
tree_files = {tree_files}

[output]
path       = {path}
force      = {force}

[enhance]
enabled    = {enabled}
api_key    = {api_key}
model      = {model}",
        dir = show_path(config.dir.as_deref(), "."),
        max_depth = show_usize(config.scanning.max_depth, 10),
        verbose = show_bool(config.scanning.verbose, false),
        tree_files = show_usize(config.scanning.tree_files, 50),
        path = show_path(config.output.path.as_deref(), "README.md"),
        force = show_bool(config.output.force, false),
        enabled = show_bool(config.enhance.enabled, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readme_gen::config::file::{FileEnhanceConfig, FileScanConfig};

    #[test]
    fn test_resolve_output_path_default() {
        let root = Path::new("/projects/demo");
        assert_eq!(
            resolve_output_path(None, root),
            PathBuf::from("/projects/demo/README.md")
        );
    }

    #[test]
    fn test_resolve_output_path_relative_joins_root() {
        let root = Path::new("/projects/demo");
        assert_eq!(
            resolve_output_path(Some(Path::new("docs/OUT.md")), root),
            PathBuf::from("/projects/demo/docs/OUT.md")
        );
    }

    #[test]
    fn test_resolve_output_path_absolute_used_as_given() {
        let root = Path::new("/projects/demo");
        assert_eq!(
            resolve_output_path(Some(Path::new("/tmp/OUT.md")), root),
            PathBuf::from("/tmp/OUT.md")
        );
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let formatted = format_config(&FileConfig::default());

        assert!(formatted.contains("max_depth  = 10  (default)"));
        assert!(formatted.contains("tree_files = 50  (default)"));
        assert!(formatted.contains("path       = \"README.md\"  (default)"));
        assert!(formatted.contains("(unset - using $ANTHROPIC_API_KEY)"));
    }

    #[test]
    fn test_format_config_shows_values_and_redacts_key() {
        let config = FileConfig {
            scanning: FileScanConfig {
                max_depth: Some(3),
                ..FileScanConfig::default()
            },
            enhance: FileEnhanceConfig {
                api_key: Some("sk-ant-secret".to_string()),
                ..FileEnhanceConfig::default()
            },
            ..FileConfig::default()
        };

        let formatted = format_config(&config);

        assert!(formatted.contains("max_depth  = 3"));
        assert!(formatted.contains("api_key    = (set)"));
        assert!(!formatted.contains("sk-ant-secret"));
    }
}
