//! Formula configuration loaded from `tapgen.toml`.
//!
//! Every key is optional in the file so values can be layered: the file
//! provides defaults, and command-line flags or environment variables
//! override them before the result becomes a [`FormulaSpec`].

use crate::error::{Error, Result};
use crate::spec::FormulaSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "tapgen.toml";

/// Partially specified formula fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormulaConfig {
    /// One-line description
    pub description: Option<String>,
    /// Project homepage (defaults to `repo_url`)
    pub homepage: Option<String>,
    /// Repository URL hosting release artifacts
    pub repo_url: Option<String>,
    /// Release version
    pub version: Option<String>,
    /// Binary and archive name
    pub binary_name: Option<String>,
    /// Archive checksum
    pub sha256: Option<String>,
}

impl FormulaConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid
    /// configuration TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io("reading configuration", Some(path.to_path_buf()), e))?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded formula configuration");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using overrides only");
            Ok(Self::default())
        }
    }

    /// Layers `overrides` on top of `self`; set values in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            description: overrides.description.or(self.description),
            homepage: overrides.homepage.or(self.homepage),
            repo_url: overrides.repo_url.or(self.repo_url),
            version: overrides.version.or(self.version),
            binary_name: overrides.binary_name.or(self.binary_name),
            sha256: overrides.sha256.or(self.sha256),
        }
    }

    /// Builds a spec from the layered values.
    ///
    /// Only presence is checked here; value rules are enforced by
    /// [`FormulaSpec::validate`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first required field that
    /// was never provided.
    pub fn into_spec(self) -> Result<FormulaSpec> {
        let repo_url = require(self.repo_url, "repo_url", "--repo")?;
        let binary_name = require(self.binary_name, "binary_name", "--bin")?;
        let description = require(self.description, "description", "--description")?;
        let version = require(self.version, "version", "--version")?;
        let sha256 = require(
            self.sha256,
            "sha256",
            "--sha256, --checksum-file or --archive",
        )?;

        let mut spec = FormulaSpec::new(binary_name, repo_url)
            .with_description(description)
            .with_version(version)
            .with_sha256(sha256);
        if let Some(homepage) = self.homepage {
            spec = spec.with_homepage(homepage);
        }
        Ok(spec)
    }
}

fn require(value: Option<String>, field: &str, flag: &str) -> Result<String> {
    value.ok_or_else(|| {
        Error::config_with_help(
            format!("missing required field `{field}`"),
            format!("Set `{field}` in {DEFAULT_CONFIG_FILE} or pass {flag}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_config() -> FormulaConfig {
        FormulaConfig {
            description: Some("Worktree manager".to_string()),
            homepage: None,
            repo_url: Some("https://github.com/x/worktreemanager".to_string()),
            version: Some("1.2.3".to_string()),
            binary_name: Some("worktreemanager".to_string()),
            sha256: Some("a".repeat(64)),
        }
    }

    #[test]
    fn test_parse_toml() {
        let config: FormulaConfig = toml::from_str(
            r#"
description = "Worktree manager"
repo_url = "https://github.com/x/worktreemanager"
binary_name = "worktreemanager"
"#,
        )
        .unwrap();
        assert_eq!(config.description.as_deref(), Some("Worktree manager"));
        assert_eq!(config.binary_name.as_deref(), Some("worktreemanager"));
        assert!(config.version.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<FormulaConfig, _> = toml::from_str("shasum = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version = \"2.0.0\"").unwrap();
        let config = FormulaConfig::load(file.path()).unwrap();
        assert_eq!(config.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version = ").unwrap();
        let err = FormulaConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FormulaConfig::load(Path::new("/nonexistent/tapgen.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_optional_missing_file() {
        let config = FormulaConfig::load_optional(Path::new("/nonexistent/tapgen.toml")).unwrap();
        assert_eq!(config, FormulaConfig::default());
    }

    #[test]
    fn test_merge_overrides_win() {
        let overrides = FormulaConfig {
            version: Some("9.9.9".to_string()),
            ..FormulaConfig::default()
        };
        let merged = full_config().merge(overrides);
        assert_eq!(merged.version.as_deref(), Some("9.9.9"));
        assert_eq!(merged.description.as_deref(), Some("Worktree manager"));
    }

    #[test]
    fn test_into_spec_defaults_homepage() {
        let spec = full_config().into_spec().unwrap();
        assert_eq!(spec.homepage, "https://github.com/x/worktreemanager");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_into_spec_explicit_homepage() {
        let config = FormulaConfig {
            homepage: Some("https://example.com".to_string()),
            ..full_config()
        };
        assert_eq!(config.into_spec().unwrap().homepage, "https://example.com");
    }

    #[test]
    fn test_into_spec_missing_field() {
        let config = FormulaConfig {
            version: None,
            ..full_config()
        };
        let err = config.into_spec().unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
