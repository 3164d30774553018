//! `render` and `validate`: layer configuration into a spec and use it.

use super::{CommandOutput, load_template};
use crate::cli::{CliError, SpecArgs};
use serde_json::json;
use std::path::{Path, PathBuf};
use tapgen_formula::checksum::{compute_sha256, read_checksum_file};
use tapgen_formula::{DEFAULT_CONFIG_FILE, FormulaConfig, FormulaFields, FormulaSpec, Template};
use tracing::{debug, info};

/// Where a rendered formula goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Print to stdout
    Stdout,
    /// Write `<bin>.rb` into this directory
    Directory(PathBuf),
}

/// Builds a spec from the config file, flags and environment.
///
/// An explicit `--config` must exist; the default `tapgen.toml` is optional.
///
/// # Errors
///
/// Returns a config error if a file cannot be loaded, the checksum cannot
/// be obtained, or a required field is missing.
pub fn resolve_spec(args: &SpecArgs) -> Result<FormulaSpec, CliError> {
    let file_config = match &args.config {
        Some(path) => FormulaConfig::load(path)?,
        None => FormulaConfig::load_optional(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    let sha256 = if let Some(sha256) = &args.sha256 {
        Some(sha256.clone())
    } else if let Some(path) = &args.checksum_file {
        debug!(path = %path.display(), "Reading checksum file");
        Some(read_checksum_file(path)?)
    } else if let Some(path) = &args.archive {
        debug!(path = %path.display(), "Hashing release archive");
        Some(compute_sha256(path)?)
    } else {
        None
    };

    let overrides = FormulaConfig {
        description: args.description.clone(),
        homepage: args.homepage.clone(),
        repo_url: args.repo.clone(),
        version: args.version.clone(),
        binary_name: args.bin.clone(),
        sha256,
    };

    Ok(file_config.merge(overrides).into_spec()?)
}

/// Renders a formula and writes or prints it.
///
/// # Errors
///
/// Returns an error if the spec cannot be resolved, rendering fails, or the
/// output file cannot be written.
pub fn execute_render(
    args: &SpecArgs,
    template: Option<&Path>,
    target: &OutputTarget,
) -> Result<CommandOutput, CliError> {
    let spec = resolve_spec(args)?;
    let source = load_template(template)?;
    let formula = Template::parse(&source).render(&spec)?;
    let fields = FormulaFields::parse(&formula);

    match target {
        OutputTarget::Stdout => Ok(CommandOutput {
            data: json!({ "formula": formula, "fields": fields }),
            text: formula,
        }),
        OutputTarget::Directory(dir) => {
            let path = write_formula(dir, &spec.binary_name, &formula)?;
            info!(
                path = %path.display(),
                binary = %spec.binary_name,
                version = %spec.version,
                "Formula written"
            );
            Ok(CommandOutput {
                text: format!("Wrote {}\n", path.display()),
                data: json!({ "path": path, "fields": fields }),
            })
        }
    }
}

/// Validates the resolved spec without rendering.
///
/// # Errors
///
/// Returns an error if the spec cannot be resolved or a field is invalid.
pub fn execute_validate(args: &SpecArgs) -> Result<CommandOutput, CliError> {
    let spec = resolve_spec(args)?;
    spec.validate()?;
    info!(binary = %spec.binary_name, version = %spec.version, "Formula spec is valid");

    Ok(CommandOutput {
        text: format!(
            "{} {} is valid (class {})\n",
            spec.binary_name,
            spec.version,
            spec.class_name()
        ),
        data: json!({
            "spec": spec,
            "class_name": spec.class_name(),
            "url": spec.download_url(),
        }),
    })
}

fn write_formula(dir: &Path, binary_name: &str, formula: &str) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        CliError::other_with_help(
            format!("Failed to create output directory {}: {e}", dir.display()),
            "Check file permissions and ensure the path exists",
        )
    })?;
    let path = dir.join(format!("{binary_name}.rb"));
    std::fs::write(&path, formula).map_err(|e| {
        CliError::other_with_help(
            format!("Failed to write formula {}: {e}", path.display()),
            "Check file permissions and ensure the path exists",
        )
    })?;
    Ok(path)
}
