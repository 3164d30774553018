//! `version`: package and build information.

use super::CommandOutput;
use serde_json::json;
use tracing::instrument;

/// Reports the package name, version and process correlation id.
#[instrument]
#[must_use]
pub fn execute_version() -> CommandOutput {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");
    let description = env!("CARGO_PKG_DESCRIPTION");

    tracing::debug!(
        package_name = name,
        package_version = version,
        "Gathering package information"
    );

    CommandOutput {
        text: format!(
            "{name} {version} - {description}\nCorrelation ID: {}\n",
            crate::tracing::correlation_id()
        ),
        data: json!({
            "name": name,
            "version": version,
            "correlation_id": crate::tracing::correlation_id().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_format() {
        let output = execute_version();
        assert!(output.text.starts_with("tapgen "));
        assert!(output.text.contains(env!("CARGO_PKG_VERSION")));
        assert!(output.text.contains("Correlation ID:"));
        assert_eq!(output.data["name"], "tapgen");
    }
}
