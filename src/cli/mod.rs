use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

mod args;
mod commands;
mod exit_status;
mod report;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "XTRACT_LOG";

/// Install the stderr log subscriber.
///
/// `XTRACT_LOG` wins when set; otherwise warnings only, or debug output for
/// this crate with `-v`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,xtract=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let result = match command {
        Command::Extract(cmd) => commands::extract::extract(cmd, &cwd)?,
        Command::Compare(cmd) => commands::compare::compare(cmd, &cwd)?,
        Command::Init => commands::init::init(&cwd)?,
    };
    report::print(&result, verbose);

    Ok(ExitStatus::from_error_count(result.error_count))
}
