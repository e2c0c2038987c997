//! Text helpers for rendering README content.

/// Turn a project name into a repository-style slug.
///
/// Lowercases the name and replaces spaces with dashes. Used wherever the
/// generated document needs a GitHub-style repository name (clone URLs,
/// badge URLs).
///
/// # Examples
///
/// ```
/// # use readme_gen::utils::slugify;
/// assert_eq!(slugify("My Cool Project"), "my-cool-project");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
