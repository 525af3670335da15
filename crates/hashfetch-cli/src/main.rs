use clap::Parser;
use hashfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse();
    if let Err(err) = cli.run().await {
        cli::report_error(&err);
        std::process::exit(1);
    }
}
