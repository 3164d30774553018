//! Homebrew formula templating for tapgen.
//!
//! This crate turns per-release metadata ([`FormulaSpec`]) into a Homebrew
//! formula by substituting `{{name}}` placeholders in a template.
//!
//! # Features
//!
//! - Field validation (URLs, SHA-256 digests, required text)
//! - Placeholder substitution with precise missing/invalid field errors
//! - Extraction of stanzas from rendered formulas
//! - SHA-256 computation for release archives and checksum files
//! - TOML configuration with flag/env overrides
//!
//! # Example
//!
//! ```rust
//! use tapgen_formula::{FormulaSpec, Template};
//!
//! let spec = FormulaSpec::new("worktreemanager", "https://github.com/x/worktreemanager")
//!     .with_description("Worktree manager")
//!     .with_version("1.2.3")
//!     .with_sha256("a".repeat(64));
//!
//! let formula = Template::default_formula().render(&spec)?;
//! assert!(formula.contains("version '1.2.3'"));
//! # Ok::<(), tapgen_formula::RenderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod checksum;
pub mod config;
pub mod error;
mod fields;
mod spec;
mod template;

pub use config::{DEFAULT_CONFIG_FILE, FormulaConfig};
pub use error::{Error, RenderError, Result};
pub use fields::FormulaFields;
pub use spec::{ALIASES, FormulaSpec, PLACEHOLDERS, is_sha256_hex};
pub use template::{DEFAULT_TEMPLATE, Template, render};
