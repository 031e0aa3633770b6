//! CLI entry point for strata.
//!
//! Parses command-line arguments with clap, runs the selected analysis,
//! renders the summary to stdout, and maps errors to exit codes. Logging is
//! initialised eagerly so every later step can emit structured diagnostics
//! via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use strata_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use strata_core::StrataError;
use tracing::{error, field};

/// Parse CLI arguments, execute the command, render the summary, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, format, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let cli_error = err.downcast_ref::<CliError>();
        let core = cli_error.and_then(|inner| match inner {
            CliError::Core(failure) => Some(failure),
            _ => None,
        });
        let input_path = cli_error.and_then(|inner| match inner {
            CliError::Io { path, .. } => Some(field::display(path.display())),
            _ => None,
        });

        error!(
            error = %err,
            code = core.map(|failure| field::display(failure.code().as_str())),
            edge_source_code = core
                .and_then(StrataError::edge_source_code)
                .map(|code| field::display(code.as_str())),
            input_path,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
