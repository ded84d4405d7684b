//! `lockgraph` command line tool
//!
//! Reads a `yarn.lock` and prints its entries or the dependency edges
//! between them. Logging goes to stderr; command output goes to stdout.

mod cli;
mod commands;
mod errors;
mod tracing;

use crate::cli::parse;
use crate::commands::Command;
use crate::tracing::{Level, TracingConfig};
use ::tracing::instrument;
use lockgraph_yarn::ReaderOptions;
use miette::IntoDiagnostic;
use std::io::Write;

#[allow(clippy::print_stderr)]
fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    if let Err(error) = run_main() {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

fn run_main() -> miette::Result<()> {
    let cli = parse();

    crate::tracing::init_tracing(TracingConfig {
        format: cli.log_format,
        level: Level::from(cli.level),
        log_file: cli.log_file.clone(),
        filter: cli.log_filter.clone(),
    })?;

    let options = ReaderOptions::default().with_indent_width(usize::from(cli.indent_width));
    run_command(&Command::from(cli.command), options)
}

#[instrument(name = "lockgraph_command", skip(options))]
fn run_command(command: &Command, options: ReaderOptions) -> miette::Result<()> {
    let output = commands::execute(command, options)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").into_diagnostic()?;
    stdout.flush().into_diagnostic()
}
