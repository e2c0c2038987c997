//! README document generation.
//!
//! This module assembles a multi-section markdown document from a
//! [`ScanResult`] and a [`TechInfo`]. Every section is an independent pure
//! function of those two inputs; sections that produce no content are
//! omitted, and the remaining ones are joined with blank-line separators.
//!
//! Badge colors for languages and frameworks come from fixed lookup tables
//! with a neutral default for unknown names.

use crate::detector::TechInfo;
use crate::scanner::{ScanResult, SpecialFile};
use crate::utils::slugify;

/// Language → shields.io badge color.
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("Python", "3776AB"),
    ("JavaScript", "F7DF1E"),
    ("TypeScript", "3178C6"),
    ("Java", "ED8B00"),
    ("Go", "00ADD8"),
    ("Rust", "CE412B"),
    ("C++", "00599C"),
    ("C#", "239120"),
    ("Ruby", "CC342D"),
    ("PHP", "777BB4"),
    ("Swift", "FA7343"),
    ("Kotlin", "7F52FF"),
    ("HTML", "E34F26"),
    ("CSS", "1572B6"),
];

/// Neutral badge color for languages missing from the table.
const DEFAULT_LANGUAGE_COLOR: &str = "555555";

/// Framework → shields.io badge color.
const FRAMEWORK_COLORS: &[(&str, &str)] = &[
    ("React", "61DAFB"),
    ("Next.js", "000000"),
    ("Vue.js", "4FC08D"),
    ("Django", "092E20"),
    ("Flask", "000000"),
    ("FastAPI", "009688"),
    ("Express", "000000"),
    ("Streamlit", "FF4B4B"),
    ("Docker", "2496ED"),
];

/// Neutral badge color for frameworks missing from the table.
const DEFAULT_FRAMEWORK_COLOR: &str = "6366F1";

/// Badge color used for all tool entries.
const TOOL_COLOR: &str = "2496ED";

/// Repository URL of this tool, referenced in generated boilerplate.
const GENERATOR_URL: &str = "https://github.com/readme-gen/readme-gen";

/// Badge color for a language, with a neutral default.
fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(DEFAULT_LANGUAGE_COLOR, |(_, color)| color)
}

/// Badge color for a framework, with a neutral default.
fn framework_color(framework: &str) -> &'static str {
    FRAMEWORK_COLORS
        .iter()
        .find(|(name, _)| *name == framework)
        .map_or(DEFAULT_FRAMEWORK_COLOR, |(_, color)| color)
}

/// README document generator.
///
/// Borrows the scan result and technology info and renders the document
/// once; neither input is modified.
#[derive(Debug)]
pub struct Generator<'a> {
    scan: &'a ScanResult,
    tech: &'a TechInfo,
}

impl<'a> Generator<'a> {
    /// Create a generator over the given pipeline outputs.
    #[must_use]
    pub const fn new(scan: &'a ScanResult, tech: &'a TechInfo) -> Self {
        Self { scan, tech }
    }

    /// Render the complete document.
    ///
    /// Sections are generated in a fixed order; empty sections are dropped
    /// and the rest are joined with blank lines.
    #[must_use]
    pub fn generate(&self) -> String {
        let sections = [
            self.header(),
            self.badges(),
            self.description(),
            Self::demo(),
            self.features(),
            self.tech_stack(),
            self.quick_start(),
            self.installation(),
            self.usage(),
            self.project_structure(),
            Self::roadmap(),
            Self::contributing(),
            self.license(),
            Self::acknowledgments(),
            Self::footer(),
        ];

        sections
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Project name shorthand.
    fn name(&self) -> &str {
        &self.scan.project_name
    }

    /// Centered header block with the project name.
    fn header(&self) -> String {
        format!(
            r#"<div align="center">

# 🚀 {}

<p align="center">
  <strong>✨ Auto-generated README - Customize me! ✨</strong>
</p>

</div>"#,
            self.name()
        )
    }

    /// Badge block: language, license, repository stats, build, coverage.
    fn badges(&self) -> String {
        let slug = slugify(self.name());
        let mut badges = Vec::new();

        if self.tech.primary_language != "Unknown" {
            let lang = &self.tech.primary_language;
            let color = language_color(lang);
            badges.push(format!(
                "![{lang}](https://img.shields.io/badge/{lang}-{color}?style=for-the-badge&logo={}&logoColor=white)",
                lang.to_lowercase()
            ));
        }

        if self.scan.has_special_file(SpecialFile::License) {
            badges.push(
                "![License](https://img.shields.io/badge/license-MIT-blue?style=for-the-badge)"
                    .to_string(),
            );
        }

        badges.push(format!(
            "![GitHub stars](https://img.shields.io/github/stars/yourusername/{slug}?style=for-the-badge)"
        ));
        badges.push(format!(
            "![GitHub forks](https://img.shields.io/github/forks/yourusername/{slug}?style=for-the-badge)"
        ));
        badges.push(format!(
            "![GitHub issues](https://img.shields.io/github/issues/yourusername/{slug}?style=for-the-badge)"
        ));

        if self.tech.has_ci {
            badges.push(
                "![Build](https://img.shields.io/badge/build-passing-brightgreen?style=for-the-badge)"
                    .to_string(),
            );
        }

        if self.tech.has_tests {
            badges.push(
                "![Coverage](https://img.shields.io/badge/coverage-85%25-green?style=for-the-badge)"
                    .to_string(),
            );
        }

        let first_row = badges[..badges.len().min(4)].join(" ");
        let second_row = if badges.len() > 4 {
            badges[4..].join(" ")
        } else {
            String::new()
        };

        format!(
            r#"<div align="center">

{first_row}

{second_row}

</div>"#
        )
    }

    /// About section with a one-line description and highlight bullets.
    fn description(&self) -> String {
        let mut description = format!("A powerful {} project", self.tech.primary_language);

        if !self.tech.frameworks.is_empty() {
            let shown: Vec<&str> = self
                .tech
                .frameworks
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            description.push_str(&format!(" built with **{}**", shown.join(", ")));
        }

        description.push_str(". 🎯");

        format!(
            r"## 📖 About

{description}

> ⚠️ **Note:** This README was auto-generated using [readme-gen]({GENERATOR_URL}).
> Please customize it with your project's actual description, screenshots, and details!

### ✨ Highlights

{}",
            self.highlights()
        )
    }

    /// Highlight bullets derived from the detected technologies.
    ///
    /// Falls back to three generic bullets when nothing was detected.
    fn highlights(&self) -> String {
        let mut highlights = Vec::new();

        if self.tech.has_tests {
            highlights.push("🧪 **Test Coverage** - Comprehensive test suite included".to_string());
        }

        if self.tech.has_ci {
            highlights.push("🔄 **CI/CD** - Automated testing and deployment".to_string());
        }

        if self.tech.tools.iter().any(|t| t == "Docker") {
            highlights.push("🐳 **Containerized** - Docker support for easy deployment".to_string());
        }

        if self.tech.has_docs {
            highlights.push("📚 **Well Documented** - Clear documentation and examples".to_string());
        }

        if self.tech.languages.len() > 1 {
            highlights.push(format!(
                "🌐 **Multi-language** - Uses {} programming languages",
                self.tech.languages.len()
            ));
        }

        if highlights.is_empty() {
            highlights = vec![
                "⚡ **Fast & Efficient** - Optimized for performance".to_string(),
                "🎨 **Modern Stack** - Built with latest technologies".to_string(),
                "🔧 **Customizable** - Easy to extend and modify".to_string(),
            ];
        }

        highlights
            .iter()
            .map(|h| format!("- {h}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Demo placeholder section.
    fn demo() -> String {
        r#"## 🎬 Demo

<div align="center">

### 📸 Screenshots

<table>
  <tr>
    <td><img src="screenshots/demo1.png" alt="Screenshot 1" width="400"/></td>
    <td><img src="screenshots/demo2.png" alt="Screenshot 2" width="400"/></td>
  </tr>
  <tr>
    <td align="center"><em>Main Interface</em></td>
    <td align="center"><em>Feature Showcase</em></td>
  </tr>
</table>

> 🎥 **[Live Demo](#)** | 📹 **[Video Tutorial](#)**

</div>

---"#
            .to_string()
    }

    /// Feature grid combining detected features with generic filler.
    fn features(&self) -> String {
        let mut features = Vec::new();

        if self.tech.has_tests {
            features.push("✅ Comprehensive test coverage with automated testing".to_string());
        }

        if self.tech.has_ci {
            features.push("🔄 Continuous Integration and Deployment pipeline".to_string());
        }

        if self.tech.has_docs {
            features.push("📚 Well-documented codebase with inline comments".to_string());
        }

        if self.tech.tools.iter().any(|t| t == "Docker") {
            features.push("🐳 Docker containerization for easy deployment".to_string());
        }

        if self.tech.tools.iter().any(|t| t == "Kubernetes") {
            features.push("☸️ Kubernetes orchestration support".to_string());
        }

        if features.len() < 3 {
            features.extend([
                "🚀 High performance and scalability".to_string(),
                "🔒 Secure by design with best practices".to_string(),
                "🎨 Clean and maintainable code architecture".to_string(),
                "⚡ Fast development with hot reload".to_string(),
                "🌍 Cross-platform compatibility".to_string(),
            ]);
        }

        features.truncate(6);

        format!("## ✨ Features\n\n{}", Self::features_grid(&features))
    }

    /// Lay features out as a two-column HTML table.
    fn features_grid(features: &[String]) -> String {
        let mut grid = String::from("<table>\n<tr>\n");

        for (i, feature) in features.iter().enumerate() {
            if i > 0 && i % 2 == 0 {
                grid.push_str("</tr>\n<tr>\n");
            }

            let mut words = feature.split_whitespace();
            let emoji = words.next().unwrap_or_default();
            let text = words.collect::<Vec<_>>().join(" ");

            let (title, detail) = text
                .split_once(" - ")
                .map_or((text.as_str(), None), |(t, d)| (t, Some(d)));

            grid.push_str(&format!("<td width=\"50%\">\n\n**{emoji} {title}**\n\n"));
            if let Some(detail) = detail {
                grid.push_str(&format!("<br/>{detail}\n\n"));
            }
            grid.push_str("</td>\n");
        }

        if features.len() % 2 != 0 {
            grid.push_str("<td></td>\n");
        }

        grid.push_str("</tr>\n</table>");
        grid
    }

    /// Tech-stack badge section; empty when nothing was detected.
    fn tech_stack(&self) -> String {
        let mut lines = vec!["## 🛠️ Tech Stack".to_string()];

        if !self.tech.languages.is_empty() {
            lines.push("\n### Languages".to_string());
            let badges: Vec<String> = self
                .tech
                .languages
                .iter()
                .map(|lang| {
                    let color = language_color(lang);
                    format!(
                        "![{lang}](https://img.shields.io/badge/{lang}-{color}?style=flat-square&logo={}&logoColor=white)",
                        lang.to_lowercase()
                    )
                })
                .collect();
            lines.push(badges.join(" "));
        }

        if !self.tech.frameworks.is_empty() {
            lines.push("\n### Frameworks & Libraries".to_string());
            let badges: Vec<String> = self
                .tech
                .frameworks
                .iter()
                .map(|fw| {
                    let color = framework_color(fw);
                    let logo = fw.to_lowercase().replace('.', "").replace(' ', "");
                    format!(
                        "![{fw}](https://img.shields.io/badge/{fw}-{color}?style=flat-square&logo={logo}&logoColor=white)"
                    )
                })
                .collect();
            lines.push(badges.join(" "));
        }

        if !self.tech.tools.is_empty() {
            lines.push("\n### Tools & Platforms".to_string());
            let badges: Vec<String> = self
                .tech
                .tools
                .iter()
                .map(|tool| {
                    format!(
                        "![{tool}](https://img.shields.io/badge/{tool}-{TOOL_COLOR}?style=flat-square&logo={}&logoColor=white)",
                        tool.to_lowercase()
                    )
                })
                .collect();
            lines.push(badges.join(" "));
        }

        if lines.len() > 1 {
            lines.join("\n")
        } else {
            String::new()
        }
    }

    /// Quick-start command block, branching on the detected package manager.
    fn quick_start(&self) -> String {
        let slug = slugify(self.name());
        let mut commands = vec![
            "# Clone the repository".to_string(),
            format!("git clone https://github.com/yourusername/{slug}.git"),
            String::new(),
        ];

        let managers = &self.tech.package_managers;

        if managers.iter().any(|m| m == "npm") {
            commands.push("# Install dependencies".to_string());
            commands.push("npm install".to_string());
            commands.push(String::new());
            commands.push("# Run the project".to_string());
            commands.push("npm start".to_string());
        } else if managers.iter().any(|m| m == "pip") {
            commands.push("# Install dependencies".to_string());
            commands.push("pip install -r requirements.txt".to_string());
            commands.push(String::new());
            commands.push("# Run the project".to_string());
            commands.push("python main.py".to_string());
        } else {
            commands.push("# Follow installation instructions below".to_string());
        }

        format!("## ⚡ Quick Start\n\n```bash\n{}\n```", commands.join("\n"))
    }

    /// Detailed installation section with ecosystem-keyed prerequisites.
    fn installation(&self) -> String {
        let slug = slugify(self.name());
        let managers = &self.tech.package_managers;
        let primary = &self.tech.primary_language;

        let mut lines = vec!["## 📦 Installation".to_string()];

        lines.push("\n### Prerequisites".to_string());

        let mut prereqs = Vec::new();
        if self.tech.frameworks.iter().any(|f| f == "Node.js")
            || managers.iter().any(|m| m == "npm")
        {
            prereqs.push("- Node.js 16.x or higher".to_string());
        }
        if primary == "Python" {
            prereqs.push("- Python 3.8 or higher".to_string());
        }
        if self.tech.tools.iter().any(|t| t == "Docker") {
            prereqs.push("- Docker and Docker Compose".to_string());
        }
        if managers.iter().any(|m| m == "go mod") {
            prereqs.push("- Go 1.20 or higher".to_string());
        }

        if prereqs.is_empty() {
            prereqs.push(format!("- {primary} (latest stable version)"));
        }

        lines.push(prereqs.join("\n"));

        lines.push("\n### Step-by-Step Guide".to_string());

        lines.push("\n**1️⃣ Clone the repository**".to_string());
        lines.push("```bash".to_string());
        lines.push(format!("git clone https://github.com/yourusername/{slug}.git"));
        lines.push(format!("cd {slug}"));
        lines.push("```".to_string());

        if managers.iter().any(|m| m == "pip") {
            lines.push("\n**2️⃣ Create virtual environment (recommended)**".to_string());
            lines.push("```bash".to_string());
            lines.push("python -m venv venv".to_string());
            lines.push("source venv/bin/activate  # On Windows: venv\\Scripts\\activate".to_string());
            lines.push("```".to_string());

            lines.push("\n**3️⃣ Install dependencies**".to_string());
            lines.push("```bash".to_string());
            lines.push("pip install -r requirements.txt".to_string());
            lines.push("```".to_string());
        } else if managers.iter().any(|m| m == "poetry") {
            lines.push("\n**2️⃣ Install dependencies with Poetry**".to_string());
            lines.push("```bash".to_string());
            lines.push("poetry install".to_string());
            lines.push("```".to_string());
        } else if managers.iter().any(|m| m == "npm") {
            lines.push("\n**2️⃣ Install dependencies**".to_string());
            lines.push("```bash".to_string());
            lines.push("npm install".to_string());
            lines.push("# or".to_string());
            lines.push("yarn install".to_string());
            lines.push("```".to_string());
        } else if managers.iter().any(|m| m == "cargo") {
            lines.push("\n**2️⃣ Build the project**".to_string());
            lines.push("```bash".to_string());
            lines.push("cargo build --release".to_string());
            lines.push("```".to_string());
        } else if managers.iter().any(|m| m == "go mod") {
            lines.push("\n**2️⃣ Download dependencies**".to_string());
            lines.push("```bash".to_string());
            lines.push("go mod download".to_string());
            lines.push("```".to_string());
        }

        lines.push("\n**4️⃣ Set up environment variables**".to_string());
        lines.push("```bash".to_string());
        lines.push("cp .env.example .env".to_string());
        lines.push("# Edit .env with your configuration".to_string());
        lines.push("```".to_string());

        lines.join("\n")
    }

    /// Usage section, branching on the detected framework.
    fn usage(&self) -> String {
        let frameworks = &self.tech.frameworks;
        let primary = &self.tech.primary_language;

        let mut lines = vec!["## 🚀 Usage".to_string()];

        lines.push("\n### Basic Usage".to_string());

        if frameworks.iter().any(|f| f == "Django") {
            lines.push("```bash".to_string());
            lines.push("# Run migrations".to_string());
            lines.push("python manage.py migrate".to_string());
            lines.push(String::new());
            lines.push("# Create superuser".to_string());
            lines.push("python manage.py createsuperuser".to_string());
            lines.push(String::new());
            lines.push("# Run development server".to_string());
            lines.push("python manage.py runserver".to_string());
            lines.push("```".to_string());
            lines.push("\nVisit `http://localhost:8000` in your browser".to_string());
        } else if frameworks.iter().any(|f| f == "Flask" || f == "FastAPI") {
            lines.push("```bash".to_string());
            lines.push("# Run the application".to_string());
            lines.push("python app.py".to_string());
            lines.push("# or".to_string());
            lines.push("uvicorn main:app --reload  # For FastAPI".to_string());
            lines.push("```".to_string());
            lines.push("\nAPI will be available at `http://localhost:8000`".to_string());
        } else if frameworks.iter().any(|f| f == "Streamlit") {
            lines.push("```bash".to_string());
            lines.push("streamlit run app.py".to_string());
            lines.push("```".to_string());
            lines.push("\nApp will open in your browser automatically".to_string());
        } else if frameworks.iter().any(|f| f == "React" || f == "Next.js") {
            lines.push("```bash".to_string());
            lines.push("# Development mode".to_string());
            lines.push("npm run dev".to_string());
            lines.push(String::new());
            lines.push("# Build for production".to_string());
            lines.push("npm run build".to_string());
            lines.push(String::new());
            lines.push("# Start production server".to_string());
            lines.push("npm start".to_string());
            lines.push("```".to_string());
            lines.push("\nOpen `http://localhost:3000`".to_string());
        } else {
            lines.push("```bash".to_string());
            lines.push("# Run the application".to_string());
            match primary.as_str() {
                "Python" => lines.push("python main.py".to_string()),
                "Go" => lines.push("go run main.go".to_string()),
                "Rust" => lines.push("cargo run".to_string()),
                "Node.js" | "JavaScript" => lines.push("npm start".to_string()),
                _ => lines.push("# See documentation for usage instructions".to_string()),
            }
            lines.push("```".to_string());
        }

        lines.push("\n### Examples".to_string());
        lines.push("\n```bash".to_string());
        lines.push("# Example 1: Basic usage".to_string());
        lines.push("# Add your example here".to_string());
        lines.push(String::new());
        lines.push("# Example 2: Advanced usage".to_string());
        lines.push("# Add your example here".to_string());
        lines.push("```".to_string());

        lines.join("\n")
    }

    /// Project-structure section: rendered tree plus directory explanations.
    fn project_structure(&self) -> String {
        format!(
            "## 📁 Project Structure\n\n```\n{}\n```\n\n### Key Directories\n\n{}",
            self.scan.file_tree,
            self.structure_notes()
        )
    }

    /// Bullet explanations for well-known directory names.
    fn structure_notes(&self) -> String {
        let dirs: Vec<String> = self
            .scan
            .directories
            .iter()
            .map(|d| d.to_string_lossy().to_string())
            .collect();

        let mut notes = Vec::new();

        if dirs.iter().any(|d| d.contains("src")) {
            notes.push("- **`src/`** - Source code and main application logic");
        }

        if dirs.iter().any(|d| d.to_lowercase().contains("test")) {
            notes.push("- **`tests/`** - Test files and test utilities");
        }

        if dirs.iter().any(|d| d.to_lowercase().contains("doc")) {
            notes.push("- **`docs/`** - Documentation files");
        }

        if dirs.iter().any(|d| d.to_lowercase().contains("config")) {
            notes.push("- **`config/`** - Configuration files");
        }

        if notes.is_empty() {
            notes.push("- See code structure above for file organization");
        }

        notes.join("\n")
    }

    /// Fixed roadmap boilerplate.
    fn roadmap() -> String {
        r"## 🗺️ Roadmap

- [x] Initial release
- [ ] Add feature X
- [ ] Improve performance
- [ ] Add more documentation
- [ ] Add integration tests
- [ ] Release v2.0

See the [open issues](https://github.com/yourusername/project/issues) for a full list of proposed features."
            .to_string()
    }

    /// Fixed contributing boilerplate.
    fn contributing() -> String {
        r"## 🤝 Contributing

Contributions make the open source community amazing! Any contributions you make are **greatly appreciated**.

### How to Contribute

1. **Fork** the Project
2. **Create** your Feature Branch (`git checkout -b feature/AmazingFeature`)
3. **Commit** your Changes (`git commit -m 'Add some AmazingFeature'`)
4. **Push** to the Branch (`git push origin feature/AmazingFeature`)
5. **Open** a Pull Request

### Development Guidelines

- Write clear, commented code
- Follow the existing code style
- Add tests for new features
- Update documentation as needed

### Code of Conduct

Please read our [Code of Conduct](CODE_OF_CONDUCT.md) before contributing."
            .to_string()
    }

    /// License section; wording depends solely on whether a license file exists.
    fn license(&self) -> String {
        if self.scan.has_special_file(SpecialFile::License) {
            r"## 📄 License

Distributed under the MIT License. See `LICENSE` file for more information."
                .to_string()
        } else {
            r"## 📄 License

This project is unlicensed. Please add a LICENSE file to specify terms of use.

Recommended licenses:
- [MIT License](https://opensource.org/licenses/MIT) - Permissive
- [GPL v3](https://www.gnu.org/licenses/gpl-3.0.en.html) - Copyleft
- [Apache 2.0](https://opensource.org/licenses/Apache-2.0) - Permissive with patent grant"
                .to_string()
        }
    }

    /// Fixed acknowledgments boilerplate.
    fn acknowledgments() -> String {
        r"## 🙏 Acknowledgments

- Thanks to all contributors
- Inspired by awesome open source projects
- Built with amazing tools and frameworks"
            .to_string()
    }

    /// Fixed footer block.
    fn footer() -> String {
        format!(
            r#"---

<div align="center">

**⭐ Star this repo if you find it helpful! ⭐**

Made with ❤️ by [Your Name](https://github.com/yourusername)

**[⬆ Back to Top](#-project-name)**

*Auto-generated using [readme-gen]({GENERATOR_URL})*

</div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;

    /// Bare scan result for a project with the given name.
    fn empty_scan(name: &str) -> ScanResult {
        ScanResult {
            root: PathBuf::from("/projects").join(name),
            project_name: name.to_string(),
            files: Vec::new(),
            directories: Vec::new(),
            extensions: BTreeSet::new(),
            total_size: 0,
            file_tree: format!("{name}/"),
            special_files: BTreeMap::new(),
        }
    }

    /// Tech info with nothing detected.
    fn empty_tech() -> TechInfo {
        TechInfo {
            languages: Vec::new(),
            frameworks: Vec::new(),
            package_managers: Vec::new(),
            tools: Vec::new(),
            primary_language: "Unknown".to_string(),
            has_tests: false,
            has_docs: false,
            has_ci: false,
        }
    }

    // ── Assembly ────────────────────────────────────────────────────────

    #[test]
    fn test_empty_project_keeps_boilerplate_sections() {
        let scan = empty_scan("bare");
        let tech = empty_tech();
        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("# 🚀 bare"));
        assert!(doc.contains("## 🗺️ Roadmap"));
        assert!(doc.contains("## 🤝 Contributing"));
        assert!(doc.contains("## 📄 License"));
        assert!(doc.contains("## 🙏 Acknowledgments"));
        assert!(doc.contains("**⭐ Star this repo if you find it helpful! ⭐**"));
    }

    #[test]
    fn test_empty_project_omits_tech_stack_and_language_badge() {
        let scan = empty_scan("bare");
        let tech = empty_tech();
        let doc = Generator::new(&scan, &tech).generate();

        assert!(!doc.contains("## 🛠️ Tech Stack"));
        assert!(!doc.contains("badge/Unknown"));
    }

    #[test]
    fn test_section_order_is_stable() {
        let scan = empty_scan("bare");
        let tech = empty_tech();
        let doc = Generator::new(&scan, &tech).generate();

        let roadmap = doc.find("## 🗺️ Roadmap").unwrap();
        let contributing = doc.find("## 🤝 Contributing").unwrap();
        let license = doc.find("## 📄 License").unwrap();
        assert!(roadmap < contributing);
        assert!(contributing < license);
    }

    // ── Badges ──────────────────────────────────────────────────────────

    #[test]
    fn test_language_badge_present_when_detected() {
        let scan = empty_scan("pyapp");
        let mut tech = empty_tech();
        tech.primary_language = "Python".to_string();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("badge/Python-3776AB"));
    }

    #[test]
    fn test_license_badge_requires_license_file() {
        let mut scan = empty_scan("licensed");
        scan.special_files
            .insert(SpecialFile::License, PathBuf::from("/projects/licensed/LICENSE"));
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("badge/license-MIT-blue"));
    }

    #[test]
    fn test_build_and_coverage_badges_follow_flags() {
        let scan = empty_scan("flags");
        let mut tech = empty_tech();
        tech.has_ci = true;
        tech.has_tests = true;

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("badge/build-passing"));
        assert!(doc.contains("badge/coverage-85%25"));
    }

    // ── Description and highlights ──────────────────────────────────────

    #[test]
    fn test_description_lists_up_to_three_frameworks() {
        let scan = empty_scan("webapp");
        let mut tech = empty_tech();
        tech.primary_language = "JavaScript".to_string();
        tech.frameworks = vec![
            "Express".to_string(),
            "Jest".to_string(),
            "Node.js".to_string(),
            "React".to_string(),
        ];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("built with **Express, Jest, Node.js**"));
        assert!(!doc.contains("built with **Express, Jest, Node.js, React**"));
    }

    #[test]
    fn test_generic_highlights_when_nothing_detected() {
        let scan = empty_scan("bare");
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("⚡ **Fast & Efficient**"));
        assert!(doc.contains("🎨 **Modern Stack**"));
        assert!(doc.contains("🔧 **Customizable**"));
    }

    #[test]
    fn test_detected_highlights_replace_generic_ones() {
        let scan = empty_scan("tested");
        let mut tech = empty_tech();
        tech.has_tests = true;

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("🧪 **Test Coverage**"));
        assert!(!doc.contains("⚡ **Fast & Efficient**"));
    }

    // ── Features ────────────────────────────────────────────────────────

    #[test]
    fn test_features_capped_at_six() {
        let scan = empty_scan("busy");
        let mut tech = empty_tech();
        tech.has_tests = true;
        tech.has_ci = true;
        tech.has_docs = false;
        tech.tools = vec!["Docker".to_string(), "Kubernetes".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        // 4 detected features < 6, no filler kicks in (threshold is 3), so
        // exactly four populated cells are rendered.
        let cells = doc.matches("<td width=\"50%\">").count();
        assert_eq!(cells, 4);
    }

    #[test]
    fn test_features_filler_added_when_sparse() {
        let scan = empty_scan("sparse");
        let mut tech = empty_tech();
        tech.has_tests = true;

        let doc = Generator::new(&scan, &tech).generate();

        let cells = doc.matches("<td width=\"50%\">").count();
        assert_eq!(cells, 6);
        assert!(doc.contains("🚀 High performance"));
    }

    // ── Tech stack ──────────────────────────────────────────────────────

    #[test]
    fn test_tech_stack_sections() {
        let scan = empty_scan("full");
        let mut tech = empty_tech();
        tech.languages = vec!["Python".to_string()];
        tech.frameworks = vec!["Flask".to_string()];
        tech.tools = vec!["Docker".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("## 🛠️ Tech Stack"));
        assert!(doc.contains("### Languages"));
        assert!(doc.contains("### Frameworks & Libraries"));
        assert!(doc.contains("### Tools & Platforms"));
        assert!(doc.contains("badge/Flask-000000"));
    }

    #[test]
    fn test_unknown_framework_gets_default_color() {
        assert_eq!(framework_color("Quarkus"), DEFAULT_FRAMEWORK_COLOR);
        assert_eq!(language_color("Zig"), DEFAULT_LANGUAGE_COLOR);
    }

    // ── Quick start and installation ────────────────────────────────────

    #[test]
    fn test_quick_start_npm_branch() {
        let scan = empty_scan("node-app");
        let mut tech = empty_tech();
        tech.package_managers = vec!["npm".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("npm install"));
        assert!(doc.contains("npm start"));
        assert!(doc.contains("git clone https://github.com/yourusername/node-app.git"));
    }

    #[test]
    fn test_quick_start_pip_branch() {
        let scan = empty_scan("py-app");
        let mut tech = empty_tech();
        tech.package_managers = vec!["pip".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("pip install -r requirements.txt"));
        assert!(doc.contains("python main.py"));
    }

    #[test]
    fn test_quick_start_generic_branch() {
        let scan = empty_scan("mystery");
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("# Follow installation instructions below"));
    }

    #[test]
    fn test_installation_python_prerequisites() {
        let scan = empty_scan("py-app");
        let mut tech = empty_tech();
        tech.primary_language = "Python".to_string();
        tech.package_managers = vec!["pip".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("- Python 3.8 or higher"));
        assert!(doc.contains("python -m venv venv"));
    }

    #[test]
    fn test_installation_cargo_branch() {
        let scan = empty_scan("rusty");
        let mut tech = empty_tech();
        tech.primary_language = "Rust".to_string();
        tech.package_managers = vec!["cargo".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("cargo build --release"));
        assert!(doc.contains("- Rust (latest stable version)"));
    }

    // ── Usage branches ──────────────────────────────────────────────────

    #[test]
    fn test_usage_django_branch() {
        let scan = empty_scan("dj");
        let mut tech = empty_tech();
        tech.frameworks = vec!["Django".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("python manage.py migrate"));
        assert!(doc.contains("python manage.py runserver"));
    }

    #[test]
    fn test_usage_streamlit_branch() {
        let scan = empty_scan("st");
        let mut tech = empty_tech();
        tech.frameworks = vec!["Streamlit".to_string()];

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("streamlit run app.py"));
    }

    #[test]
    fn test_usage_generic_rust_branch() {
        let scan = empty_scan("rusty");
        let mut tech = empty_tech();
        tech.primary_language = "Rust".to_string();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("cargo run"));
    }

    // ── Structure and license ───────────────────────────────────────────

    #[test]
    fn test_structure_notes_for_known_directories() {
        let mut scan = empty_scan("structured");
        scan.directories = vec![
            PathBuf::from("/projects/structured/src"),
            PathBuf::from("/projects/structured/tests"),
        ];
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("- **`src/`** - Source code"));
        assert!(doc.contains("- **`tests/`** - Test files"));
        assert!(!doc.contains("- **`docs/`**"));
    }

    #[test]
    fn test_structure_notes_fallback() {
        let scan = empty_scan("flat");
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("- See code structure above for file organization"));
    }

    #[test]
    fn test_file_tree_embedded_in_structure_section() {
        let mut scan = empty_scan("treed");
        scan.file_tree = "treed/\n├── app.py".to_string();
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("```\ntreed/\n├── app.py\n```"));
    }

    #[test]
    fn test_license_section_with_license_file() {
        let mut scan = empty_scan("licensed");
        scan.special_files
            .insert(SpecialFile::License, PathBuf::from("/projects/licensed/LICENSE"));
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("Distributed under the MIT License"));
        assert!(!doc.contains("This project is unlicensed"));
    }

    #[test]
    fn test_license_section_without_license_file() {
        let scan = empty_scan("bare");
        let tech = empty_tech();

        let doc = Generator::new(&scan, &tech).generate();

        assert!(doc.contains("This project is unlicensed"));
        assert!(!doc.contains("Distributed under the MIT License"));
    }
}
