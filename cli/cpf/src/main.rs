//! cpf - validate, format, and generate CPF numbers.
//!
//! Single values and files (one CPF per line) are supported; batch results
//! are emitted as JSON records.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;
mod telemetry;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    // Run the command
    if let Err(e) = cli.run().await {
        // Print error in a user-friendly way
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
