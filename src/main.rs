/*!
 * schedule - Main Entry Point
 *
 * Usage: schedule <quantum_ms> <prog 1> [args] [: <prog 2> [args] [: ...]]
 */

use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use rr_schedule::cli::Cli;
use rr_schedule::core::limits::EXIT_FAILURE;
use rr_schedule::{init_tracing, run, SchedulerError};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    init_tracing();

    let result = cli
        .into_config()
        .map_err(SchedulerError::from)
        .and_then(|config| run(&config));

    match result {
        Ok(stats) => {
            info!(%stats, "Scheduler finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !e.is_usage() {
                error!(error = %e, "Fatal scheduler error");
            }
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
