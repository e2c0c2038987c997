//! Technology detection from scan results.
//!
//! This module consumes a [`ScanResult`] and derives a [`TechInfo`]: the
//! languages, frameworks, package managers, and tools a project appears to
//! use, plus summary flags for tests, documentation, and CI. Detection is
//! purely heuristic (extension tables, marker filenames, and coarse
//! substring checks against file paths and manifest contents) and always
//! best-effort: a manifest that fails to parse simply contributes nothing.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use serde::Serialize;

use crate::scanner::{ScanResult, SpecialFile};

/// Extension → language table.
///
/// Order matters for primary-language tie-breaking: when two languages have
/// the same file count, the one whose extension appears first in this table
/// wins. Programming languages are listed before markup formats so that a
/// one-file Python project with a README still reads as a Python project.
const LANGUAGES: &[(&str, &str)] = &[
    (".py", "Python"),
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".jsx", "React"),
    (".tsx", "React"),
    (".java", "Java"),
    (".c", "C"),
    (".cpp", "C++"),
    (".cs", "C#"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".rb", "Ruby"),
    (".php", "PHP"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".scala", "Scala"),
    (".r", "R"),
    (".m", "Objective-C"),
    (".sh", "Shell"),
    (".html", "HTML"),
    (".css", "CSS"),
    (".scss", "SASS"),
    (".vue", "Vue"),
    (".sql", "SQL"),
    (".md", "Markdown"),
];

/// Framework → path-substring indicators.
///
/// A framework is detected when any discovered file path contains any of its
/// indicators. Indicators are either concrete filenames (`next.config.js`)
/// or raw tokens (`react`) matched against the stringified path; this is a
/// coarse substring test, not a dependency check.
const FRAMEWORK_INDICATORS: &[(&str, &[&str])] = &[
    ("React", &["package.json", "react"]),
    ("Next.js", &["next.config.js", "next.config.ts"]),
    ("Vue.js", &["vue.config.js", "nuxt.config.js"]),
    ("Angular", &["angular.json"]),
    ("Django", &["manage.py", "settings.py"]),
    ("Flask", &["app.py", "flask"]),
    ("FastAPI", &["main.py", "fastapi"]),
    ("Express", &["express"]),
    ("Node.js", &["package.json"]),
    ("Docker", &["Dockerfile", "docker-compose.yml"]),
    ("Kubernetes", &[".yaml", "k8s"]),
    ("Terraform", &[".tf"]),
    ("Streamlit", &["streamlit"]),
    ("Pytest", &["pytest.ini", "conftest.py"]),
    ("Jest", &["jest.config.js"]),
];

/// Package manager → marker filenames (exact name match).
const PACKAGE_MANAGERS: &[(&str, &[&str])] = &[
    ("pip", &["requirements.txt", "setup.py"]),
    ("poetry", &["pyproject.toml", "poetry.lock"]),
    ("npm", &["package.json", "package-lock.json"]),
    ("yarn", &["yarn.lock"]),
    ("pnpm", &["pnpm-lock.yaml"]),
    ("cargo", &["Cargo.toml"]),
    ("go mod", &["go.mod"]),
    ("maven", &["pom.xml"]),
    ("gradle", &["build.gradle"]),
];

/// Dependency keys checked in the package manifest (`dependencies` union
/// `devDependencies`).
const MANIFEST_DEPENDENCIES: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue.js"),
    ("express", "Express"),
    ("@angular/core", "Angular"),
];

/// Framework names checked case-insensitively in requirements-style files.
const REQUIREMENTS_KEYWORDS: &[(&str, &str)] = &[
    ("django", "Django"),
    ("flask", "Flask"),
    ("fastapi", "FastAPI"),
    ("streamlit", "Streamlit"),
    ("pytest", "Pytest"),
];

/// Substrings (against lower-cased paths) that indicate a test suite.
const TEST_INDICATORS: &[&str] = &["test", "tests", "spec", "__tests__", "pytest", "jest"];

/// Substrings (case-sensitive) that indicate documentation.
const DOC_INDICATORS: &[&str] = &["docs", "documentation", "doc", "README"];

/// Derived, read-only view of the technologies used by a project.
///
/// Produced once by [`TechDetector::detect`] and immutable thereafter.
#[derive(Clone, Debug, Serialize)]
pub struct TechInfo {
    /// Detected language names, sorted lexically
    pub languages: Vec<String>,

    /// Detected framework names, sorted lexically
    pub frameworks: Vec<String>,

    /// Detected package manager names
    pub package_managers: Vec<String>,

    /// Detected tool names
    pub tools: Vec<String>,

    /// Language with the most matching files, or `"Unknown"`
    pub primary_language: String,

    /// Whether any file path looks test-related
    pub has_tests: bool,

    /// Whether any file path looks documentation-related
    pub has_docs: bool,

    /// Whether a CI configuration file was found
    pub has_ci: bool,
}

/// Rule-based technology detector.
///
/// Borrows a [`ScanResult`] and derives a [`TechInfo`] from it. Running the
/// detector twice on the same scan yields identical results.
#[derive(Debug)]
pub struct TechDetector<'a> {
    scan: &'a ScanResult,
}

impl<'a> TechDetector<'a> {
    /// Create a detector over the given scan result.
    #[must_use]
    pub const fn new(scan: &'a ScanResult) -> Self {
        Self { scan }
    }

    /// Detect all technologies used in the project.
    #[must_use]
    pub fn detect(&self) -> TechInfo {
        TechInfo {
            languages: self.detect_languages(),
            frameworks: self.detect_frameworks(),
            package_managers: self.detect_package_managers(),
            tools: self.detect_tools(),
            primary_language: self.primary_language(),
            has_tests: self.has_tests(),
            has_docs: self.has_docs(),
            has_ci: self.scan.has_special_file(SpecialFile::Ci),
        }
    }

    /// Map an extension (with leading dot) to its language name.
    fn language_for_extension(ext: &str) -> Option<&'static str> {
        LANGUAGES
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, lang)| *lang)
    }

    /// Union of languages mapped from the observed extensions, sorted.
    fn detect_languages(&self) -> Vec<String> {
        let languages: BTreeSet<&str> = self
            .scan
            .extensions
            .iter()
            .filter_map(|ext| Self::language_for_extension(ext))
            .collect();

        languages.into_iter().map(String::from).collect()
    }

    /// Union of the three framework heuristics, sorted.
    fn detect_frameworks(&self) -> Vec<String> {
        let mut frameworks = BTreeSet::new();

        let paths: Vec<String> = self
            .scan
            .files
            .iter()
            .map(|f| f.to_string_lossy().to_string())
            .collect();

        for (framework, indicators) in FRAMEWORK_INDICATORS {
            if indicators
                .iter()
                .any(|indicator| paths.iter().any(|path| path.contains(indicator)))
            {
                frameworks.insert((*framework).to_string());
            }
        }

        if let Some(manifest) = self.scan.special_file(SpecialFile::Package) {
            frameworks.extend(Self::manifest_frameworks(manifest));
        }

        if let Some(requirements) = self.scan.special_file(SpecialFile::Requirements) {
            frameworks.extend(Self::requirements_frameworks(requirements));
        }

        frameworks.into_iter().collect()
    }

    /// Frameworks declared as dependencies in the package manifest.
    ///
    /// Read and parse failures yield an empty set; a broken manifest degrades
    /// detection coverage without surfacing an error.
    fn manifest_frameworks(manifest: &Path) -> BTreeSet<String> {
        let mut frameworks = BTreeSet::new();

        let Ok(content) = fs::read_to_string(manifest) else {
            return frameworks;
        };
        let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) else {
            return frameworks;
        };

        let mut dependencies = BTreeSet::new();
        for table in ["dependencies", "devDependencies"] {
            if let Some(deps) = json.get(table).and_then(|v| v.as_object()) {
                dependencies.extend(deps.keys().cloned());
            }
        }

        for (key, framework) in MANIFEST_DEPENDENCIES {
            if dependencies.contains(*key) {
                frameworks.insert((*framework).to_string());
            }
        }

        frameworks
    }

    /// Frameworks named in a requirements-style file.
    ///
    /// The check is a case-insensitive substring test over the whole file
    /// content. Read failures yield an empty set.
    fn requirements_frameworks(requirements: &Path) -> BTreeSet<String> {
        let mut frameworks = BTreeSet::new();

        let Ok(content) = fs::read_to_string(requirements) else {
            return frameworks;
        };
        let content = content.to_lowercase();

        for (keyword, framework) in REQUIREMENTS_KEYWORDS {
            if content.contains(keyword) {
                frameworks.insert((*framework).to_string());
            }
        }

        frameworks
    }

    /// Package managers whose marker files appear among the discovered files.
    fn detect_package_managers(&self) -> Vec<String> {
        let file_names: BTreeSet<String> = self
            .scan
            .files
            .iter()
            .filter_map(|f| f.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();

        PACKAGE_MANAGERS
            .iter()
            .filter(|(_, markers)| markers.iter().any(|m| file_names.contains(*m)))
            .map(|(manager, _)| (*manager).to_string())
            .collect()
    }

    /// Development tools inferred from special files and path contents.
    fn detect_tools(&self) -> Vec<String> {
        let mut tools = Vec::new();

        if self.scan.has_special_file(SpecialFile::Docker) {
            tools.push("Docker".to_string());
        }

        if self.scan.has_special_file(SpecialFile::Ci) {
            tools.push("CI/CD".to_string());
        }

        let paths: Vec<String> = self
            .scan
            .files
            .iter()
            .map(|f| f.to_string_lossy().to_string())
            .collect();

        let has_yaml = paths
            .iter()
            .any(|p| p.contains(".yaml") || p.contains(".yml"));
        let has_k8s = paths
            .iter()
            .any(|p| p.contains("k8s") || p.contains("kubernetes"));
        if has_yaml && has_k8s {
            tools.push("Kubernetes".to_string());
        }

        if self.scan.has_special_file(SpecialFile::Makefile) {
            tools.push("Make".to_string());
        }

        tools
    }

    /// The language with the most matching files.
    ///
    /// Counts every scanned file whose extension maps to a language. Ties are
    /// broken by position in the extension table ([`LANGUAGES`]), which lists
    /// programming languages before markup formats. Returns `"Unknown"` when
    /// no extension maps.
    fn primary_language(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for file in &self.scan.files {
            if let Some(ext) = file.extension() {
                let dotted = format!(".{}", ext.to_string_lossy());
                if let Some(lang) = Self::language_for_extension(&dotted) {
                    *counts.entry(lang).or_insert(0) += 1;
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (_, lang) in LANGUAGES {
            if let Some(&count) = counts.get(lang)
                && best.is_none_or(|(_, best_count)| count > best_count)
            {
                best = Some((lang, count));
            }
        }

        best.map_or_else(|| "Unknown".to_string(), |(lang, _)| lang.to_string())
    }

    /// Whether any file path, lower-cased, contains a test indicator.
    fn has_tests(&self) -> bool {
        self.scan.files.iter().any(|f| {
            let path = f.to_string_lossy().to_lowercase();
            TEST_INDICATORS.iter().any(|i| path.contains(i))
        })
    }

    /// Whether any file path contains a documentation indicator.
    fn has_docs(&self) -> bool {
        self.scan.files.iter().any(|f| {
            let path = f.to_string_lossy();
            DOC_INDICATORS.iter().any(|i| path.contains(i))
        })
    }
}
