//! `placeholders`: list the tokens a template uses.

use super::{CommandOutput, load_template};
use crate::cli::CliError;
use serde_json::json;
use std::fmt::Write;
use std::path::Path;
use tapgen_formula::{FormulaSpec, Template};

/// Lists each placeholder and whether a formula spec can fill it.
///
/// # Errors
///
/// Returns an error if the template file cannot be read.
pub fn execute_placeholders(template: Option<&Path>) -> Result<CommandOutput, CliError> {
    let source = load_template(template)?;
    let parsed = Template::parse(&source);
    let names = parsed.placeholders();

    let mut text = String::new();
    let mut unknown = Vec::new();
    for name in &names {
        if FormulaSpec::knows(name) {
            let _ = writeln!(text, "{name}");
        } else {
            let _ = writeln!(text, "{name} (unknown)");
            unknown.push(*name);
        }
    }

    Ok(CommandOutput {
        text,
        data: json!({ "placeholders": names, "unknown": unknown }),
    })
}
