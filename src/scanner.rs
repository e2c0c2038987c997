//! Directory scanning and project metadata collection.
//!
//! This module provides the scanning logic that traverses a project tree and
//! collects the raw material for technology detection and README generation:
//! file and directory lists, observed file extensions, a rendered file tree,
//! and the "special" marker files (README, license, manifests, CI config)
//! found directly under the project root.
//!
//! Traversal is depth-first, bounded by a maximum depth, and best-effort:
//! directories that cannot be read (permissions, races) are skipped silently
//! and only reported in verbose mode.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::ScanOptions;

/// Directory names that are never scanned.
///
/// Covers version control metadata, build output, dependency caches, and IDE
/// state. An ignored directory is pruned entirely, so nothing below it is
/// visited.
const IGNORE_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".github",
    "node_modules",
    "venv",
    "env",
    ".venv",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "target",
    "bin",
    "obj",
    ".idea",
    ".vscode",
    ".DS_Store",
    "coverage",
    ".pytest_cache",
    "__MACOSX",
    ".mypy_cache",
    ".tox",
];

/// File names that are never recorded.
///
/// OS metadata and lockfiles carry no signal for the generated document.
const IGNORE_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    ".gitignore",
    ".gitattributes",
    "package-lock.json",
    "yarn.lock",
    "poetry.lock",
    "Pipfile.lock",
];

/// Dotfiles exempt from the "skip hidden entries" rule.
const ALLOWED_DOTFILES: &[&str] = &[".env.example", ".editorconfig"];

/// Categories of special project files discovered under the root.
///
/// Each category is resolved to the first existing candidate file, checked in
/// a fixed priority order and only directly under the project root.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialFile {
    /// Existing README document (`README.md`, `README.rst`, ...)
    Readme,

    /// License file (`LICENSE`, `COPYING`, ...)
    License,

    /// Python-style dependency listing (`requirements.txt`, `pyproject.toml`, ...)
    Requirements,

    /// Package manifest (`package.json`, `Cargo.toml`, `go.mod`, ...)
    Package,

    /// Generic configuration file (`.env.example`, `config.yml`, ...)
    Config,

    /// Docker-related file (`Dockerfile`, `docker-compose.yml`, ...)
    Docker,

    /// CI/CD configuration (`.github/workflows`, `.gitlab-ci.yml`, ...)
    Ci,

    /// Make build file (`Makefile`, `makefile`)
    Makefile,

    /// Changelog document (`CHANGELOG.md`, `HISTORY.md`, ...)
    Changelog,
}

/// Candidate file names per category, in priority order.
///
/// The first existing candidate wins; later candidates are not checked.
const SPECIAL_FILES: &[(SpecialFile, &[&str])] = &[
    (
        SpecialFile::Readme,
        &["README.md", "README.rst", "README.txt", "README"],
    ),
    (
        SpecialFile::License,
        &["LICENSE", "LICENSE.md", "LICENSE.txt", "COPYING"],
    ),
    (
        SpecialFile::Requirements,
        &["requirements.txt", "Pipfile", "pyproject.toml", "setup.py"],
    ),
    (
        SpecialFile::Package,
        &["package.json", "Cargo.toml", "go.mod", "pom.xml", "build.gradle"],
    ),
    (
        SpecialFile::Config,
        &[".env.example", "config.yml", "config.json", "settings.py"],
    ),
    (
        SpecialFile::Docker,
        &["Dockerfile", "docker-compose.yml", ".dockerignore"],
    ),
    (
        SpecialFile::Ci,
        &[".github/workflows", ".gitlab-ci.yml", ".travis.yml", "Jenkinsfile"],
    ),
    (SpecialFile::Makefile, &["Makefile", "makefile"]),
    (
        SpecialFile::Changelog,
        &["CHANGELOG.md", "CHANGELOG.rst", "HISTORY.md"],
    ),
];

impl SpecialFile {
    /// Stable lowercase name of the category, used for JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Readme => "readme",
            Self::License => "license",
            Self::Requirements => "requirements",
            Self::Package => "package",
            Self::Config => "config",
            Self::Docker => "docker",
            Self::Ci => "ci",
            Self::Makefile => "makefile",
            Self::Changelog => "changelog",
        }
    }
}

/// Immutable result of scanning a project directory.
///
/// Produced once per invocation by [`Scanner::scan`]; the detector and
/// generator only ever read from it.
#[derive(Clone, Debug)]
pub struct ScanResult {
    /// Canonicalized project root
    pub root: PathBuf,

    /// Name of the project, taken from the root directory's file name
    pub project_name: String,

    /// All discovered files (absolute paths, deterministic order)
    pub files: Vec<PathBuf>,

    /// All discovered directories (absolute paths, deterministic order)
    pub directories: Vec<PathBuf>,

    /// Unique file extensions observed, including the leading dot
    pub extensions: BTreeSet<String>,

    /// Total size of all discovered files in bytes
    pub total_size: u64,

    /// Indented text rendering of the project tree, capped at
    /// [`ScanOptions::tree_files`] entries
    pub file_tree: String,

    /// First matching special file per category
    pub special_files: BTreeMap<SpecialFile, PathBuf>,
}

impl ScanResult {
    /// Number of discovered files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of discovered directories.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.directories.len()
    }

    /// Path of the special file in `category`, if one was found.
    #[must_use]
    pub fn special_file(&self, category: SpecialFile) -> Option<&Path> {
        self.special_files.get(&category).map(PathBuf::as_path)
    }

    /// Whether a special file was found for `category`.
    #[must_use]
    pub fn has_special_file(&self, category: SpecialFile) -> bool {
        self.special_files.contains_key(&category)
    }
}

/// Directory scanner producing a [`ScanResult`].
///
/// The `Scanner` struct encapsulates the traversal logic: depth-first
/// iteration bounded by `max_depth`, filtering against the fixed ignore sets,
/// and discovery of special project files under the root.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    options: ScanOptions,

    /// When `true`, suppresses progress spinner output (used by `--json` mode).
    quiet: bool,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self {
            options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    ///
    /// When quiet mode is active the scanning spinner is hidden, which is
    /// required for `--json` output so that only the final JSON is printed.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Scan a project directory and collect its metadata.
    ///
    /// Traversal is depth-first and bounded by the configured maximum depth.
    /// Entries whose name is in the ignore sets, and dotfiles other than the
    /// two allow-listed names, are excluded; ignored directories are pruned
    /// so their contents are never visited. Unreadable subdirectories are
    /// skipped without failing the scan; the collected error messages are
    /// printed to stderr in verbose mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    ///
    /// # Panics
    ///
    /// This method may panic if the progress bar template string is invalid,
    /// though this should not occur under normal circumstances as the template
    /// is hardcoded and valid.
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        let root = fs::canonicalize(root)
            .with_context(|| format!("Cannot access directory {}", root.display()))?;

        anyhow::ensure!(root.is_dir(), "{} is not a directory", root.display());

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Scanning...");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };

        let mut files = Vec::new();
        let mut directories = Vec::new();
        let mut extensions = BTreeSet::new();
        let mut total_size = 0u64;
        let mut errors = Vec::new();

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(self.options.max_depth)
            .sort_by_file_name()
            .into_iter()
            // The predicate also runs on the root entry; depth 0 must pass
            // unconditionally or a project directory whose own name is in the
            // ignore set would scan as empty.
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !Self::is_ignored(entry.file_name().to_string_lossy().as_ref())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Best-effort traversal: unreadable entries degrade
                    // coverage, they don't fail the scan.
                    errors.push(format!("Error reading entry: {e}"));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                directories.push(entry.path().to_path_buf());
            } else if entry.file_type().is_file() {
                if let Some(ext) = entry.path().extension() {
                    extensions.insert(format!(".{}", ext.to_string_lossy()));
                }
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
                files.push(entry.path().to_path_buf());
                progress.set_message(format!("Scanning... {} files found", files.len()));
            }
        }

        progress.finish_with_message(format!("✅ Scanned {} files", files.len()));

        if self.options.verbose {
            for error in &errors {
                eprintln!("{}", error.red());
            }
        }

        let project_name = root
            .file_name()
            .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().to_string());

        let file_tree = self.render_tree(&root, &project_name, &files);
        let special_files = Self::find_special_files(&root);

        Ok(ScanResult {
            root,
            project_name,
            files,
            directories,
            extensions,
            total_size,
            file_tree,
            special_files,
        })
    }

    /// Whether an entry name is excluded from scanning.
    ///
    /// An entry is ignored if its name is in the fixed directory or file
    /// ignore sets, or if it is a dotfile that is not explicitly allowed.
    #[must_use]
    pub fn is_ignored(name: &str) -> bool {
        if IGNORE_DIRS.contains(&name) || IGNORE_FILES.contains(&name) {
            return true;
        }

        name.starts_with('.') && !ALLOWED_DOTFILES.contains(&name)
    }

    /// Render the discovered files as an indented text tree.
    ///
    /// Files are ordered by path depth, then lexically, and capped at the
    /// configured maximum; a trailing summary line reports how many files
    /// were left out. The rendering is cosmetic output for the document and
    /// plays no role in detection.
    fn render_tree(&self, root: &Path, project_name: &str, files: &[PathBuf]) -> String {
        let mut relative: Vec<PathBuf> = files
            .iter()
            .filter_map(|f| f.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();

        relative.sort_by(|a, b| {
            let depth_a = a.components().count();
            let depth_b = b.components().count();
            depth_a
                .cmp(&depth_b)
                .then_with(|| a.as_os_str().cmp(b.as_os_str()))
        });
        relative.truncate(self.options.tree_files);

        // Group file names by their parent directory; the root group uses
        // an empty path and sorts first.
        let mut groups: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
        for rel in &relative {
            let parent = rel.parent().map_or_else(PathBuf::new, Path::to_path_buf);
            let name = rel
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().to_string());
            groups.entry(parent).or_default().push(name);
        }

        let mut lines = vec![format!("{project_name}/")];

        for (dir, names) in &mut groups {
            let depth = dir.components().count();
            let is_root = depth == 0;

            if !is_root {
                let indent = "  ".repeat(depth);
                let dir_name = dir
                    .file_name()
                    .map_or_else(String::new, |n| n.to_string_lossy().to_string());
                lines.push(format!("{indent}├── {dir_name}/"));
            }

            let indent = "  ".repeat(depth + usize::from(!is_root));
            names.sort();
            for name in names {
                lines.push(format!("{indent}├── {name}"));
            }
        }

        if files.len() > self.options.tree_files {
            lines.push(format!(
                "  ... and {} more files",
                files.len() - self.options.tree_files
            ));
        }

        lines.join("\n")
    }

    /// Discover special project files directly under the root.
    ///
    /// For each category the candidate names are checked in priority order
    /// and the first existing path is recorded. Only the root directory is
    /// consulted; the check is non-recursive.
    fn find_special_files(root: &Path) -> BTreeMap<SpecialFile, PathBuf> {
        let mut special_files = BTreeMap::new();

        for (category, candidates) in SPECIAL_FILES {
            for candidate in *candidates {
                let path = root.join(candidate);
                if path.exists() {
                    special_files.insert(*category, path);
                    break;
                }
            }
        }

        special_files
    }
}
