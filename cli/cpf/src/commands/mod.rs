//! CLI commands.

mod format;
mod generate;
mod telemetry;
mod validate;

use anyhow::Result;
use chrono::Datelike;
use clap::{CommandFactory, Parser, Subcommand};
use cpf_core::CpfEngine;

use crate::config;
use crate::error::error_kind;
use crate::output::OutputFormat;
use crate::telemetry::Telemetry;

/// CPF Tool - validate, format, and generate CPF numbers.
#[derive(Debug, Parser)]
#[command(name = "cpf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for result records.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    output_format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate CPF(s). Use --file to validate from a file.
    #[command(short_flag = 'v')]
    Validate(validate::ValidateCommand),

    /// Format a CPF as ###.###.###-##.
    #[command(short_flag = 'f')]
    Format(format::FormatCommand),

    /// Generate random CPF(s).
    #[command(short_flag = 'g')]
    Generate(generate::GenerateCommand),

    /// Configure anonymous usage telemetry.
    Telemetry(telemetry::TelemetryCommand),

    /// Show version information.
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Validate(_) => "validate",
            Commands::Format(_) => "format",
            Commands::Generate(_) => "generate",
            Commands::Telemetry(_) => "telemetry",
            Commands::Version => "version",
        }
    }
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        };

        let config_dir = match config::config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory");
                None
            }
        };

        let mut ctx = CommandContext {
            format: self.output_format,
            telemetry: Telemetry::init(config_dir),
            engine: CpfEngine::new(),
        };

        let name = command.name();
        tracing::debug!(command = name, "running command");

        let result = match command {
            Commands::Validate(cmd) => cmd.run(&ctx),
            Commands::Format(cmd) => cmd.run(&ctx),
            Commands::Generate(cmd) => cmd.run(&mut ctx),
            // Telemetry changes are not themselves reported.
            Commands::Telemetry(cmd) => return cmd.run(&mut ctx),
            Commands::Version => {
                print_version();
                Ok(())
            }
        };

        let kind = result.as_ref().err().map(error_kind);
        ctx.telemetry.track(name, result.is_ok(), kind).await;

        result
    }
}

fn print_version() {
    println!(
        "CPF Tool version {} ({}) built on {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("CPF_BUILD_COMMIT").unwrap_or("none"),
        option_env!("CPF_BUILD_DATE").unwrap_or("unknown"),
    );
    println!("Developed by Diego Peixoto for aquarela.io");
    println!("Copyleft © 2024-{}", chrono::Utc::now().year());
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
    pub telemetry: Telemetry,
    pub engine: CpfEngine,
}
