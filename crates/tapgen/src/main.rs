//! tapgen CLI entry point.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, Write};
use tapgen::cli::{self, Cli, EXIT_OK, OkEnvelope, exit_code_for, render_error};
use tapgen::commands;
use tapgen::tracing::{TracingConfig, init_tracing};

fn main() {
    // NOTE: Using eprintln! in panic hook is intentional - tracing infrastructure
    // may be corrupted during a panic, so we use the most reliable output method.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();
    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    let config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    };
    if let Err(e) = init_tracing(config) {
        eprintln!("Warning: {e}");
    }

    let span = tapgen::command_span!(cli.command.name());
    let _guard = span.enter();

    match commands::execute(&cli.command) {
        Ok(output) => {
            if cli.json {
                match serde_json::to_string(&OkEnvelope::new(&output.data)) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error serializing response: {e}");
                        return cli::EXIT_RENDER;
                    }
                }
            } else {
                print!("{}", output.text);
            }
            let _ = io::stdout().flush();
            EXIT_OK
        }
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            render_error(&err, cli.json);
            exit_code_for(&err)
        }
    }
}
