//! tapgen: render Homebrew formulas for pre-built release binaries.
//!
//! The binary is a thin layer over [`tapgen_formula`]: it layers a
//! `tapgen.toml` file with flags and environment variables, renders the
//! formula template and reports failures with miette diagnostics or JSON
//! envelopes.

#![warn(missing_docs)]

/// Command-line definitions, error categories and output envelopes.
pub mod cli;
/// Subcommand implementations.
pub mod commands;
/// Tracing and logging configuration.
pub mod tracing;
