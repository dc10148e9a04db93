use clap::Parser;
use std::io;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::session::Session;
use commands::{CommandContext, CommandError};
use dispatch::{CatalogCommand, CatalogDispatch, StandaloneCommand, StandaloneDispatch};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    match CatalogDispatch::from_cli(cli) {
        Some(dispatch) => {
            let session = Session::load(&ctx, cli.now.as_deref())?;
            dispatch.execute(&ctx, &session)
        }
        None => Err(CommandError::Usage(format!(
            "unhandled command: {:?}",
            cli.command
        ))),
    }
}

/// Installs the stderr log subscriber.
///
/// Library warnings (dropped rows, missing events file) show by default;
/// `--verbose` adds debug output and `--quiet` keeps only errors.
fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let targets = filter::Targets::new()
        .with_target("agenda", level)
        .with_target("agenda_core", level)
        .with_default(Level::WARN);

    tracing_subscriber::registry()
        .with(targets)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(!cli.no_color)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::NotFound { .. } => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

/// Exit status per error kind: 1 usage/filter, 3 I/O, 5 config/store.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_)
        | CommandError::Usage(_)
        | CommandError::NotFound { .. }
        | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Store(_) | CommandError::Config(_) => 5,
    }
}
