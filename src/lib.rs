//! Core library for the `readme-gen` CLI.
//!
//! This crate implements a one-directional pipeline that turns a project
//! directory into a README document:
//!
//! 1. [`scanner`] walks the directory tree and collects files, directories,
//!    extensions, and special project files (license, manifest, CI config, ...)
//! 2. [`detector`] maps the scan results to languages, frameworks, package
//!    managers, and tooling flags
//! 3. [`generator`] renders a multi-section markdown document from the
//!    detected technologies
//! 4. [`enhancer`] (optional) sends the document to the Anthropic Messages
//!    API for a best-effort rewrite, falling back to the original on failure
//!
//! Each stage consumes the immutable output of the previous one; there is no
//! shared mutable state and no concurrency.

pub mod config;
pub mod detector;
pub mod enhancer;
pub mod generator;
pub mod output;
pub mod scanner;
pub mod utils;

pub use config::{EnhanceOptions, OutputOptions, ScanOptions};
pub use detector::{TechDetector, TechInfo};
pub use enhancer::Enhancer;
pub use generator::Generator;
pub use scanner::{ScanResult, Scanner, SpecialFile};
