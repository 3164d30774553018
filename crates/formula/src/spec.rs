//! Per-release formula metadata and its validation rules.

use crate::error::RenderError;
use crate::template::contains_placeholder;
use serde::Serialize;
use std::borrow::Cow;
use tracing::warn;
use url::Url;

/// Placeholder names a [`FormulaSpec`] can resolve, excluding aliases.
pub const PLACEHOLDERS: &[&str] = &[
    "description",
    "homepage",
    "repo",
    "version",
    "bin",
    "shasum",
    "class",
];

/// Alternate placeholder names, paired with the name each one stands for.
pub const ALIASES: &[(&str, &str)] = &[
    ("repo_url", "repo"),
    ("binary_name", "bin"),
    ("sha256", "shasum"),
];

/// Metadata for one release of a binary published through Homebrew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaSpec {
    /// One-line description (`desc`)
    pub description: String,
    /// Project homepage URL
    pub homepage: String,
    /// Repository URL hosting the release artifacts
    pub repo_url: String,
    /// Release version (e.g., "1.2.3")
    pub version: String,
    /// Name of the release archive and of the installed binary
    pub binary_name: String,
    /// SHA256 checksum of the release archive
    pub sha256: String,
}

impl FormulaSpec {
    /// Creates a new spec. The homepage defaults to the repository URL.
    #[must_use]
    pub fn new(binary_name: impl Into<String>, repo_url: impl Into<String>) -> Self {
        let repo_url = repo_url.into();
        Self {
            description: String::new(),
            homepage: repo_url.clone(),
            repo_url,
            version: String::new(),
            binary_name: binary_name.into(),
            sha256: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the homepage.
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = homepage.into();
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the archive checksum.
    #[must_use]
    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = sha256.into();
        self
    }

    /// Checks every field against its rule, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidField`] for the first field that is
    /// empty, not an absolute http(s) URL where one is required, not a
    /// 64-character lowercase hex digest, or that cannot sit inside a
    /// single-quoted stanza.
    pub fn validate(&self) -> Result<(), RenderError> {
        require_text("description", &self.description)?;
        require_url("homepage", &self.homepage)?;
        require_url("repo_url", &self.repo_url)?;
        require_token("version", &self.version)?;
        require_token("binary_name", &self.binary_name)?;
        if self.binary_name.contains('/') {
            return Err(RenderError::invalid_field(
                "binary_name",
                "must be a file name, not a path",
            ));
        }
        if !self.binary_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(RenderError::invalid_field(
                "binary_name",
                "must start with an ASCII letter to form a formula class name",
            ));
        }
        require_sha256("sha256", &self.sha256)?;

        if semver::Version::parse(&self.version).is_err() {
            warn!(version = %self.version, "Version is not a semantic version");
        }

        Ok(())
    }

    /// Formula class name derived from the binary name.
    ///
    /// Follows Homebrew's naming: `worktree-manager` becomes `WorktreeManager`,
    /// `c++` becomes `Cxx`, `python@3` becomes `PythonAT3`. Characters that
    /// cannot appear in a Ruby constant are dropped and start a new word.
    #[must_use]
    pub fn class_name(&self) -> String {
        let chars: Vec<char> = self.binary_name.chars().collect();
        let mut class = String::with_capacity(chars.len());
        let mut upper_next = true;

        for (i, &c) in chars.iter().enumerate() {
            let next = chars.get(i + 1).copied();
            match c {
                '+' => class.push('x'),
                '@' if !class.is_empty() && next.is_some_and(|n| n.is_ascii_digit()) => {
                    class.push_str("AT");
                }
                c if c.is_ascii_alphanumeric() => {
                    if upper_next {
                        class.push(c.to_ascii_uppercase());
                        upper_next = false;
                    } else {
                        class.push(c.to_ascii_lowercase());
                    }
                }
                _ => upper_next = true,
            }
        }

        class
    }

    /// Release archive URL, as the default template spells it.
    #[must_use]
    pub fn download_url(&self) -> String {
        format!(
            "{}/releases/download/{}/{}.tar.gz",
            self.repo_url, self.version, self.binary_name
        )
    }

    /// Returns true if `name` is a placeholder this type can resolve,
    /// either by its template name or by an alias.
    #[must_use]
    pub fn knows(name: &str) -> bool {
        PLACEHOLDERS.contains(&canonical_name(name))
    }

    /// Resolves a placeholder name to its value.
    ///
    /// Accepts the short template names (`repo`, `bin`, `shasum`) as well as
    /// the field names they map to.
    #[must_use]
    pub fn placeholder_value(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = match canonical_name(name) {
            "description" => &self.description,
            "homepage" => &self.homepage,
            "repo" => &self.repo_url,
            "version" => &self.version,
            "bin" => &self.binary_name,
            "shasum" => &self.sha256,
            "class" => return Some(Cow::Owned(self.class_name())),
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }
}

fn canonical_name(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |&(_, canonical)| canonical)
}

/// Returns true if `value` is a 64-character lowercase hex SHA-256 digest.
#[must_use]
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn require_text(field: &str, value: &str) -> Result<(), RenderError> {
    if value.trim().is_empty() {
        return Err(RenderError::invalid_field(field, "must not be empty"));
    }
    // Stanzas are single-line string literals.
    if value.contains(['\n', '\r']) {
        return Err(RenderError::invalid_field(
            field,
            "must not contain line breaks",
        ));
    }
    // `'` closes the stanza literal and `\` escapes inside it.
    if value.contains(['\'', '\\']) {
        return Err(RenderError::invalid_field(
            field,
            "must not contain single quotes or backslashes",
        ));
    }
    if contains_placeholder(value) {
        return Err(RenderError::invalid_field(
            field,
            "must not contain a `{{name}}` placeholder",
        ));
    }
    Ok(())
}

fn require_token(field: &str, value: &str) -> Result<(), RenderError> {
    require_text(field, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(RenderError::invalid_field(
            field,
            "must not contain whitespace",
        ));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<(), RenderError> {
    require_token(field, value)?;
    let url = Url::parse(value)
        .map_err(|e| RenderError::invalid_field(field, format!("malformed URL '{value}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RenderError::invalid_field(
            field,
            format!("URL scheme must be http or https, got '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(RenderError::invalid_field(
            field,
            format!("URL '{value}' has no host"),
        ));
    }
    Ok(())
}

fn require_sha256(field: &str, value: &str) -> Result<(), RenderError> {
    if value.is_empty() {
        return Err(RenderError::invalid_field(field, "must not be empty"));
    }
    if value.len() != 64 {
        return Err(RenderError::invalid_field(
            field,
            format!("expected 64 hex characters, got {}", value.len()),
        ));
    }
    if !is_sha256_hex(value) {
        return Err(RenderError::invalid_field(
            field,
            "must contain only lowercase hex characters (0-9, a-f)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_spec() -> FormulaSpec {
        FormulaSpec::new("worktreemanager", "https://github.com/x/worktreemanager")
            .with_description("Worktree manager")
            .with_homepage("https://example.com")
            .with_version("1.2.3")
            .with_sha256("a".repeat(64))
    }

    fn invalid_field_of(spec: &FormulaSpec) -> String {
        match spec.validate() {
            Err(RenderError::InvalidField { field, .. }) => field,
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_new_defaults_homepage_to_repo() {
        let spec = FormulaSpec::new("tool", "https://github.com/x/tool");
        assert_eq!(spec.homepage, "https://github.com/x/tool");
        assert!(spec.description.is_empty());
        assert!(spec.version.is_empty());
        assert!(spec.sha256.is_empty());
    }

    #[test]
    fn test_valid_spec_passes() {
        assert!(valid_spec().validate().is_ok());
    }

    #[test]
    fn test_empty_description_rejected() {
        let spec = valid_spec().with_description("");
        assert_eq!(invalid_field_of(&spec), "description");
    }

    #[test]
    fn test_whitespace_description_rejected() {
        let spec = valid_spec().with_description("   ");
        assert_eq!(invalid_field_of(&spec), "description");
    }

    #[test]
    fn test_multiline_description_rejected() {
        let spec = valid_spec().with_description("line one\nline two");
        assert_eq!(invalid_field_of(&spec), "description");
    }

    #[test]
    fn test_quote_and_backslash_rejected() {
        let spec = valid_spec().with_description("Bob's tool");
        assert_eq!(invalid_field_of(&spec), "description");

        let spec = valid_spec().with_description(r"C:\tools");
        assert_eq!(invalid_field_of(&spec), "description");

        let spec = valid_spec().with_version("1.0'");
        assert_eq!(invalid_field_of(&spec), "version");

        assert!(valid_spec().with_description("Says \"hi\"").validate().is_ok());
    }

    #[test]
    fn test_placeholder_in_value_rejected() {
        let spec = valid_spec().with_version("{{shasum}}");
        assert_eq!(invalid_field_of(&spec), "version");

        let spec = valid_spec().with_description("uses {{ version }} literally");
        assert_eq!(invalid_field_of(&spec), "description");

        let spec = valid_spec().with_description("set {braces} and {{ unclosed");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_sha256_length_boundaries() {
        assert_eq!(invalid_field_of(&valid_spec().with_sha256("a".repeat(63))), "sha256");
        assert_eq!(invalid_field_of(&valid_spec().with_sha256("a".repeat(65))), "sha256");
        assert!(valid_spec().with_sha256("0123456789abcdef".repeat(4)).validate().is_ok());
    }

    #[test]
    fn test_sha256_rejects_non_hex_and_uppercase() {
        assert_eq!(invalid_field_of(&valid_spec().with_sha256("g".repeat(64))), "sha256");
        assert_eq!(invalid_field_of(&valid_spec().with_sha256("A".repeat(64))), "sha256");
    }

    #[test]
    fn test_relative_url_rejected() {
        let spec = valid_spec().with_homepage("example.com/path");
        assert_eq!(invalid_field_of(&spec), "homepage");
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut spec = valid_spec();
        spec.repo_url = "ftp://example.com/repo".to_string();
        assert_eq!(invalid_field_of(&spec), "repo_url");

        spec.repo_url = "mailto:someone@example.com".to_string();
        assert_eq!(invalid_field_of(&spec), "repo_url");
    }

    #[test]
    fn test_binary_name_must_be_file_name() {
        let mut spec = valid_spec();
        spec.binary_name = "bin/tool".to_string();
        assert_eq!(invalid_field_of(&spec), "binary_name");

        spec.binary_name = "my tool".to_string();
        assert_eq!(invalid_field_of(&spec), "binary_name");
    }

    #[test]
    fn test_binary_name_must_start_with_letter() {
        let mut spec = valid_spec();
        spec.binary_name = "7zip".to_string();
        assert_eq!(invalid_field_of(&spec), "binary_name");

        spec.binary_name = "-tool".to_string();
        assert_eq!(invalid_field_of(&spec), "binary_name");
    }

    #[test]
    fn test_first_invalid_field_reported() {
        let spec = valid_spec().with_description("").with_sha256("short");
        assert_eq!(invalid_field_of(&spec), "description");
    }

    #[test]
    fn test_non_semver_version_is_accepted() {
        assert!(valid_spec().with_version("2024.12.23").validate().is_ok());
    }

    #[test]
    fn test_class_name() {
        let class = |bin: &str| FormulaSpec::new(bin, "https://x.com").class_name();
        assert_eq!(class("worktreemanager"), "Worktreemanager");
        assert_eq!(class("worktree-manager"), "WorktreeManager");
        assert_eq!(class("my_tool.cli"), "MyToolCli");
        assert_eq!(class("c++"), "Cxx");
        assert_eq!(class("python@3"), "PythonAT3");
        assert_eq!(class("ripGrep"), "Ripgrep");
        assert_eq!(class("tool-"), "Tool");
        assert_eq!(class("tool--cli_"), "ToolCli");
        assert_eq!(class("a@b"), "AB");
    }

    #[test]
    fn test_download_url() {
        assert_eq!(
            valid_spec().download_url(),
            "https://github.com/x/worktreemanager/releases/download/1.2.3/worktreemanager.tar.gz"
        );
    }

    #[test]
    fn test_placeholder_aliases() {
        let spec = valid_spec();
        assert_eq!(spec.placeholder_value("repo"), spec.placeholder_value("repo_url"));
        assert_eq!(spec.placeholder_value("bin"), spec.placeholder_value("binary_name"));
        assert_eq!(spec.placeholder_value("shasum"), spec.placeholder_value("sha256"));
        assert_eq!(spec.placeholder_value("class").as_deref(), Some("Worktreemanager"));
        assert!(spec.placeholder_value("undefined_field").is_none());
    }

    #[test]
    fn test_knows_placeholders_and_aliases() {
        for name in PLACEHOLDERS {
            assert!(FormulaSpec::knows(name));
        }
        for (alias, canonical) in ALIASES {
            assert!(FormulaSpec::knows(alias));
            assert!(PLACEHOLDERS.contains(canonical));
        }
        assert!(!FormulaSpec::knows("license"));
    }

    #[test]
    fn test_every_listed_placeholder_resolves() {
        let spec = valid_spec();
        for name in PLACEHOLDERS {
            assert!(spec.placeholder_value(name).is_some(), "{name} should resolve");
        }
    }

    #[test]
    fn test_is_sha256_hex() {
        assert!(is_sha256_hex(&"f".repeat(64)));
        assert!(!is_sha256_hex(&"f".repeat(63)));
        assert!(!is_sha256_hex(""));
    }
}
