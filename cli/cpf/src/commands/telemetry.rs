//! Telemetry commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::output::{print_info, print_success};

use super::CommandContext;

/// Enable, disable, or inspect anonymous usage telemetry.
#[derive(Debug, Args)]
pub struct TelemetryCommand {
    #[command(subcommand)]
    command: TelemetrySubcommand,
}

#[derive(Debug, Subcommand)]
enum TelemetrySubcommand {
    /// Enable telemetry.
    Enable,

    /// Disable telemetry.
    Disable,

    /// Show telemetry status.
    Status,
}

impl TelemetryCommand {
    pub fn run(self, ctx: &mut CommandContext) -> Result<()> {
        match self.command {
            TelemetrySubcommand::Enable => {
                ctx.telemetry.set_enabled(true)?;
                print_success("Telemetry enabled");
            }
            TelemetrySubcommand::Disable => {
                ctx.telemetry.set_enabled(false)?;
                print_success("Telemetry disabled");
            }
            TelemetrySubcommand::Status => {
                if ctx.telemetry.opted_in() {
                    println!("Telemetry is enabled");
                    if !ctx.telemetry.is_enabled() {
                        print_info("No collector API key is configured; no events will be sent.");
                    }
                } else {
                    println!("Telemetry is disabled");
                }
            }
        }
        Ok(())
    }
}
