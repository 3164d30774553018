//! Subcommand implementations.
//!
//! Commands never print; they return a [`CommandOutput`] that `main` renders
//! as text or as a JSON envelope.

pub mod checksum;
pub mod placeholders;
pub mod render;
pub mod version;

use crate::cli::{CliError, Commands};
use serde_json::Value;
use std::path::Path;
use tapgen_formula::DEFAULT_TEMPLATE;
use tracing::instrument;

/// Result of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Human-readable output
    pub text: String,
    /// Payload for `--json`
    pub data: Value,
}

/// Runs a parsed subcommand.
///
/// # Errors
///
/// Returns the command's error, already mapped to a CLI error category.
#[instrument(skip_all, fields(command = command.name()))]
pub fn execute(command: &Commands) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Render {
            spec,
            template,
            output_dir,
            stdout,
        } => {
            let target = if *stdout {
                render::OutputTarget::Stdout
            } else {
                render::OutputTarget::Directory(output_dir.clone())
            };
            render::execute_render(spec, template.as_deref(), &target)
        }
        Commands::Validate { spec } => render::execute_validate(spec),
        Commands::Checksum { file } => checksum::execute_checksum(file),
        Commands::Placeholders { template } => {
            placeholders::execute_placeholders(template.as_deref())
        }
        Commands::Version => Ok(version::execute_version()),
    }
}

/// Reads a custom template, or returns the built-in one.
pub(crate) fn load_template(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CliError::config_with_help(
                format!("Failed to read template {}: {e}", path.display()),
                "Pass an existing file to --template or omit it to use the built-in formula",
            )
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}
