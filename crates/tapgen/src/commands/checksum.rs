//! `checksum`: hash a release archive.

use super::CommandOutput;
use crate::cli::CliError;
use serde_json::json;
use std::path::Path;
use tapgen_formula::checksum::compute_sha256;

/// Computes the SHA-256 of `file` in `sha256sum` output format.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn execute_checksum(file: &Path) -> Result<CommandOutput, CliError> {
    let sha256 = compute_sha256(file)?;
    let name = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(CommandOutput {
        text: format!("{sha256}  {name}\n"),
        data: json!({ "file": file, "sha256": sha256 }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checksum_output_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool.tar.gz");
        std::fs::write(&path, b"hello").unwrap();

        let output = execute_checksum(&path).unwrap();
        assert_eq!(
            output.text,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824  tool.tar.gz\n"
        );
        assert_eq!(
            output.data["sha256"],
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_checksum_missing_file() {
        let err = execute_checksum(Path::new("/nonexistent/tool.tar.gz")).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
