//! AI enhancement of the generated document.
//!
//! This module sends the generated README, together with a short summary of
//! the detected technologies, to the Anthropic Messages API and substitutes
//! the returned text when the call succeeds. The step is strictly
//! best-effort: any failure during the remote call (network, quota,
//! malformed response) falls back to the original document with a warning,
//! and nothing is retried.
//!
//! The API credential is explicit configuration injected at construction
//! time; a missing credential is a fatal error raised before any network
//! activity.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::config::EnhanceOptions;
use crate::detector::TechInfo;
use crate::scanner::ScanResult;

/// Model used for enhancement requests unless overridden.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Messages API endpoint.
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Required `anthropic-version` header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Maximum tokens requested for the enhanced document.
const MAX_TOKENS: u32 = 2000;

// ─── Messages API types ─────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// ─── Enhancer ───────────────────────────────────────────────────────────

/// Best-effort README enhancer backed by the Anthropic Messages API.
pub struct Enhancer {
    api_key: String,
    model: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enhancer")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Enhancer {
    /// Create an enhancer from resolved options.
    ///
    /// The caller resolves the credential (config file, then the
    /// `ANTHROPIC_API_KEY` environment variable) and passes it in; this
    /// constructor never reads the process environment itself.
    ///
    /// # Errors
    ///
    /// Returns an error when no API key is configured, or when the HTTP
    /// client cannot be constructed. No network activity happens here.
    pub fn new(options: &EnhanceOptions) -> Result<Self> {
        let Some(api_key) = options.api_key.clone().filter(|k| !k.is_empty()) else {
            bail!(
                "No API key configured for enhancement. Set the ANTHROPIC_API_KEY \
                 environment variable or add `api_key` to the [enhance] section of the \
                 config file. Keys are available from https://console.anthropic.com/"
            );
        };

        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            api_key,
            model: options
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: MESSAGES_URL.to_string(),
            client,
        })
    }

    /// Override the API endpoint.
    ///
    /// Used by tests to exercise the failure path without the network.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Enhance the document, falling back to the original on any failure.
    ///
    /// Sends one blocking request and substitutes the returned text. When
    /// the call fails for any reason a warning is printed to stderr and
    /// `readme` is returned unchanged; the pipeline never fails here.
    #[must_use]
    pub fn enhance(&self, readme: &str, scan: &ScanResult, tech: &TechInfo) -> String {
        let prompt = Self::build_prompt(readme, &Self::build_context(scan, tech));

        match self.request_enhancement(&prompt) {
            Ok(enhanced) => enhanced,
            Err(e) => {
                eprintln!("{} {e:#}", "Warning: AI enhancement failed:".yellow());
                eprintln!("Returning original README content");
                readme.to_string()
            }
        }
    }

    /// Compose the instruction prompt for the model.
    fn build_prompt(readme: &str, context: &str) -> String {
        format!(
            "You are a technical writer helping to improve a README file.\n\n\
             Here's the auto-generated README:\n\n{readme}\n\n\
             Project context:\n{context}\n\n\
             Please improve this README by:\n\
             1. Writing a compelling, professional project description (2-3 sentences)\n\
             2. Suggesting 3-5 realistic features based on the detected technologies\n\
             3. Making the overall tone more engaging and clear\n\n\
             Keep the same structure and sections, just improve the content. Do not add new sections.\n\
             Return ONLY the improved README content, no explanations."
        )
    }

    /// Summarize the scan and detection results for the prompt.
    fn build_context(scan: &ScanResult, tech: &TechInfo) -> String {
        let mut parts = vec![format!("- Primary Language: {}", tech.primary_language)];

        if !tech.languages.is_empty() {
            parts.push(format!("- Languages: {}", tech.languages.join(", ")));
        }

        if !tech.frameworks.is_empty() {
            parts.push(format!("- Frameworks: {}", tech.frameworks.join(", ")));
        }

        if !tech.package_managers.is_empty() {
            parts.push(format!(
                "- Package Managers: {}",
                tech.package_managers.join(", ")
            ));
        }

        parts.push(format!("- File Count: {}", scan.file_count()));
        parts.push(format!("- Has Tests: {}", tech.has_tests));
        parts.push(format!("- Has CI/CD: {}", tech.has_ci));

        parts.join("\n")
    }

    /// Perform the single blocking API call and extract the response text.
    fn request_enhancement(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .context("request could not be sent")?
            .error_for_status()
            .context("API returned an error status")?;

        let body: MessagesResponse = response.json().context("malformed API response")?;

        body.content
            .into_iter()
            .next()
            .map(|block| block.text)
            .filter(|text| !text.is_empty())
            .context("API response contained no text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;

    fn options(api_key: Option<&str>) -> EnhanceOptions {
        EnhanceOptions {
            enabled: true,
            api_key: api_key.map(String::from),
            model: None,
        }
    }

    fn sample_scan() -> ScanResult {
        ScanResult {
            root: PathBuf::from("/projects/demo"),
            project_name: "demo".to_string(),
            files: vec![PathBuf::from("/projects/demo/app.py")],
            directories: Vec::new(),
            extensions: BTreeSet::from([".py".to_string()]),
            total_size: 128,
            file_tree: "demo/\n├── app.py".to_string(),
            special_files: BTreeMap::new(),
        }
    }

    fn sample_tech() -> TechInfo {
        TechInfo {
            languages: vec!["Python".to_string()],
            frameworks: vec!["Flask".to_string()],
            package_managers: vec!["pip".to_string()],
            tools: Vec::new(),
            primary_language: "Python".to_string(),
            has_tests: false,
            has_docs: true,
            has_ci: false,
        }
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = Enhancer::new(&options(None));

        let err = result.err().unwrap().to_string();
        assert!(err.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_empty_api_key_is_fatal() {
        assert!(Enhancer::new(&options(Some(""))).is_err());
    }

    #[test]
    fn test_constructs_with_api_key() {
        let enhancer = Enhancer::new(&options(Some("sk-ant-test"))).unwrap();

        assert_eq!(enhancer.model, DEFAULT_MODEL);
        assert_eq!(enhancer.endpoint, MESSAGES_URL);
    }

    #[test]
    fn test_model_override() {
        let mut opts = options(Some("sk-ant-test"));
        opts.model = Some("claude-test-model".to_string());

        let enhancer = Enhancer::new(&opts).unwrap();

        assert_eq!(enhancer.model, "claude-test-model");
    }

    #[test]
    fn test_failed_request_returns_original() {
        // Nothing listens on this port, so the request fails immediately and
        // the enhancer must hand back the input untouched.
        let enhancer = Enhancer::new(&options(Some("sk-ant-test")))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/v1/messages");

        let readme = "# demo\n\nOriginal content.";
        let result = enhancer.enhance(readme, &sample_scan(), &sample_tech());

        assert_eq!(result, readme);
    }

    #[test]
    fn test_context_summarizes_detection() {
        let context = Enhancer::build_context(&sample_scan(), &sample_tech());

        assert!(context.contains("- Primary Language: Python"));
        assert!(context.contains("- Frameworks: Flask"));
        assert!(context.contains("- Package Managers: pip"));
        assert!(context.contains("- File Count: 1"));
        assert!(context.contains("- Has Tests: false"));
    }

    #[test]
    fn test_context_omits_empty_collections() {
        let mut tech = sample_tech();
        tech.languages.clear();
        tech.frameworks.clear();
        tech.package_managers.clear();

        let context = Enhancer::build_context(&sample_scan(), &tech);

        assert!(!context.contains("- Languages:"));
        assert!(!context.contains("- Frameworks:"));
        assert!(!context.contains("- Package Managers:"));
    }

    #[test]
    fn test_prompt_embeds_readme_and_context() {
        let prompt = Enhancer::build_prompt("# my readme", "- Primary Language: Python");

        assert!(prompt.contains("# my readme"));
        assert!(prompt.contains("- Primary Language: Python"));
        assert!(prompt.contains("Return ONLY the improved README content"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let enhancer = Enhancer::new(&options(Some("sk-ant-secret"))).unwrap();

        let debug = format!("{enhancer:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
