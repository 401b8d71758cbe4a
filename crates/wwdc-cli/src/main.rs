use clap::Parser;
use wwdc_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Log to a file when possible; stdout stays for results.
    if let Err(err) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr(cli.verbose);
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("wwdc-dl error: {:#}", err);
        std::process::exit(1);
    }
}
