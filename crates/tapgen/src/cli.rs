use crate::tracing::{LogLevel, TracingFormat};
use clap::{Args, Parser, Subcommand};
use miette::{Diagnostic, Report};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;
use tapgen_formula::{ALIASES, PLACEHOLDERS, RenderError};
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Rendering or validation error exit code
pub const EXIT_RENDER: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(tapgen::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Missing or invalid formula field (exit code 3)
    #[error("Render error: {message}")]
    #[diagnostic(code(tapgen::cli::render))]
    Render {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(tapgen::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new render error
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error with help text
    #[must_use]
    pub fn other_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Add help text to an existing error, returning a new error with the help text set.
    #[must_use]
    pub fn with_help(self, help_text: impl Into<String>) -> Self {
        let help = Some(help_text.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, help },
            Self::Render { message, .. } => Self::Render { message, help },
            Self::Other { message, .. } => Self::Other { message, help },
        }
    }

    /// Short machine-readable code used in JSON error envelopes
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Render { .. } => "render",
            Self::Other { .. } => "other",
        }
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::MissingField { .. } => {
                Self::render(err.to_string()).with_help(known_placeholders_help())
            }
            RenderError::InvalidField { .. } => Self::render(err.to_string()),
        }
    }
}

fn known_placeholders_help() -> String {
    let aliases: Vec<String> = ALIASES
        .iter()
        .map(|(alias, canonical)| format!("{alias} = {canonical}"))
        .collect();
    format!(
        "Known placeholders: {} (aliases: {})",
        PLACEHOLDERS.join(", "),
        aliases.join(", ")
    )
}

/// Convert `tapgen_formula::Error` to the appropriate `CliError` variant.
///
/// - Missing/invalid fields -> Render (exit code 3)
/// - Configuration and checksum input problems -> Config (exit code 2)
/// - I/O errors -> Other (exit code 3)
impl From<tapgen_formula::Error> for CliError {
    fn from(err: tapgen_formula::Error) -> Self {
        match err {
            tapgen_formula::Error::Render(render) => render.into(),
            tapgen_formula::Error::Config { message, help } => Self::Config { message, help },
            tapgen_formula::Error::ConfigParse { .. } | tapgen_formula::Error::Checksum { .. } => {
                Self::config(err.to_string())
            }
            tapgen_formula::Error::Io {
                operation,
                path,
                source,
            } => {
                let path_str = path
                    .as_ref()
                    .map_or(String::new(), |p| format!(" on {}", p.display()));
                Self::other_with_help(
                    format!("I/O failed while {operation}{path_str}: {source}"),
                    "Check file permissions and ensure the path exists",
                )
            }
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Render { .. } | CliError::Other { .. } => EXIT_RENDER,
    }
}

/// Render error appropriately based on JSON flag
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let error_envelope = ErrorEnvelope::new(serde_json::json!({
            "code": err.code(),
            "message": err.to_string()
        }));

        match serde_json::to_string(&error_envelope) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope<E> {
    /// Status indicator - always "error" for failures
    pub status: &'static str,
    /// The error details
    pub error: E,
}

impl<E> ErrorEnvelope<E> {
    /// Create a new error envelope
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Render Homebrew formulas for pre-built release binaries.
#[derive(Parser, Debug)]
#[command(name = "tapgen")]
#[command(about = "Render Homebrew formulas for pre-built release binaries")]
#[command(long_about = None)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(
        long,
        global = true,
        help = "Set log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    /// Emit JSON envelope instead of text output.
    #[arg(long, global = true, help = "Emit JSON envelope instead of text output")]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a formula from configuration and overrides.
    #[command(about = "Render a formula from configuration and overrides")]
    Render {
        /// Formula field sources.
        #[command(flatten)]
        spec: SpecArgs,
        /// Custom template file (defaults to the built-in formula template).
        #[arg(long, value_name = "FILE", env = "TAPGEN_TEMPLATE")]
        template: Option<PathBuf>,
        /// Directory to write `<bin>.rb` into.
        #[arg(
            long,
            short = 'o',
            value_name = "DIR",
            default_value = ".",
            conflicts_with = "stdout"
        )]
        output_dir: PathBuf,
        /// Print the formula instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },
    /// Validate formula fields without rendering.
    #[command(about = "Validate formula fields without rendering")]
    Validate {
        /// Formula field sources.
        #[command(flatten)]
        spec: SpecArgs,
    },
    /// Print the SHA-256 checksum of a file.
    #[command(about = "Print the SHA-256 checksum of a file")]
    Checksum {
        /// File to hash.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the placeholders a template uses.
    #[command(about = "List the placeholders a template uses")]
    Placeholders {
        /// Template file (defaults to the built-in formula template).
        #[arg(long, value_name = "FILE", env = "TAPGEN_TEMPLATE")]
        template: Option<PathBuf>,
    },
    /// Show version information.
    #[command(about = "Show version information")]
    Version,
}

impl Commands {
    /// Subcommand name, for spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Render { .. } => "render",
            Self::Validate { .. } => "validate",
            Self::Checksum { .. } => "checksum",
            Self::Placeholders { .. } => "placeholders",
            Self::Version => "version",
        }
    }
}

/// Where formula field values come from.
///
/// Flags and environment variables override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SpecArgs {
    /// Configuration file (defaults to `tapgen.toml` when present).
    #[arg(long, short = 'c', value_name = "FILE", env = "TAPGEN_CONFIG")]
    pub config: Option<PathBuf>,
    /// Formula description.
    #[arg(long, env = "TAPGEN_DESCRIPTION")]
    pub description: Option<String>,
    /// Project homepage URL (defaults to the repository URL).
    #[arg(long, env = "TAPGEN_HOMEPAGE")]
    pub homepage: Option<String>,
    /// Repository URL hosting the release artifacts.
    #[arg(long, value_name = "URL", env = "TAPGEN_REPO")]
    pub repo: Option<String>,
    /// Release version.
    #[arg(long, env = "TAPGEN_VERSION")]
    pub version: Option<String>,
    /// Binary and archive name.
    #[arg(long, value_name = "NAME", env = "TAPGEN_BIN")]
    pub bin: Option<String>,
    /// SHA-256 of the release archive.
    #[arg(
        long,
        value_name = "HEX",
        env = "TAPGEN_SHA256",
        conflicts_with_all = ["checksum_file", "archive"]
    )]
    pub sha256: Option<String>,
    /// Read the SHA-256 from a `sha256sum`-style file.
    #[arg(
        long,
        value_name = "FILE",
        env = "TAPGEN_CHECKSUM_FILE",
        conflicts_with = "archive"
    )]
    pub checksum_file: Option<PathBuf>,
    /// Compute the SHA-256 of this release archive.
    #[arg(long, value_name = "FILE", env = "TAPGEN_ARCHIVE")]
    pub archive: Option<PathBuf>,
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
