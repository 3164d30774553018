//! Error types for formula rendering and its surrounding tooling.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for formula operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the template renderer.
///
/// Rendering is a one-shot pure operation, so these are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum RenderError {
    /// A placeholder in the template has no corresponding field.
    #[error("Missing field for placeholder `{name}`")]
    #[diagnostic(
        code(tapgen::render::missing_field),
        help("A placeholder must name a formula field or one of its aliases")
    )]
    MissingField {
        /// The placeholder name as written in the template
        name: String,
    },

    /// A field failed its validation rule.
    #[error("Invalid field `{field}`: {reason}")]
    #[diagnostic(code(tapgen::render::invalid_field))]
    InvalidField {
        /// The offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl RenderError {
    /// Create a new missing field error.
    #[must_use]
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField { name: name.into() }
    }

    /// Create a new invalid field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the field or placeholder this error is about.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { name } => name,
            Self::InvalidField { field, .. } => field,
        }
    }
}

/// Errors that can occur while loading inputs for and producing a formula.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Rendering failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tapgen::config))]
    Config {
        /// The error message
        message: String,
        /// Help text for the user
        #[help]
        help: Option<String>,
    },

    /// Failed to parse a TOML configuration file.
    #[error("Invalid configuration file {}: {source}", .path.display())]
    #[diagnostic(
        code(tapgen::config::parse),
        help("Keys must be one of: description, homepage, repo_url, version, binary_name, sha256")
    )]
    ConfigParse {
        /// The file that failed to parse
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// Checksum computation or checksum file error.
    #[error("Checksum error: {message}")]
    #[diagnostic(
        code(tapgen::checksum),
        help("Checksum files use the `sha256sum` format: `<64 hex chars>  <filename>`")
    )]
    Checksum {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
    },

    /// I/O error with the operation and path that triggered it.
    #[error("I/O error while {operation}: {source}")]
    #[diagnostic(
        code(tapgen::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// What was being attempted
        operation: String,
        /// The path involved, if any
        path: Option<PathBuf>,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new configuration error with help text.
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new checksum error.
    #[must_use]
    pub fn checksum(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Checksum {
            message: message.into(),
            path,
        }
    }

    /// Create a new I/O error.
    #[must_use]
    pub fn io(operation: impl Into<String>, path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path,
            source,
        }
    }
}
