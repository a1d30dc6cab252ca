//! CLI entry point for ytcli-dl.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

mod app;
mod app_config;
mod cli;

use cli::Args;

/// Process outcome mapped to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::from(1),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => {
                app::terminal::print_error(&cli::parse_error_summary(&err));
                return ProcessExit::Failure.into();
            }
        },
    };

    match app::runtime::run_downloader(args).await {
        Ok(exit) => exit.into(),
        Err(err) => {
            app::terminal::print_error(&format!("{err:#}"));
            ProcessExit::Failure.into()
        }
    }
}
