//! Format command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cpf_core::{process_file, Operation};

use crate::error::CliError;
use crate::output::{write_records, write_text};

use super::CommandContext;

/// Format a CPF as ###.###.###-##, or every line of a file.
#[derive(Debug, Args)]
pub struct FormatCommand {
    /// CPF to format; any non-digit characters are dropped first.
    #[arg(conflicts_with = "file")]
    cpf: Option<String>,

    /// Format CPFs from a file (one per line) and emit result records.
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl FormatCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        if let Some(path) = &self.file {
            let results = process_file(path, Operation::Format)
                .with_context(|| format!("failed to process {}", path.display()))?;
            return write_records(&results, ctx.format, self.output.as_deref());
        }

        let cpf = self.cpf.as_deref().ok_or(CliError::MissingCpf("format"))?;
        let formatted = cpf_core::format(cpf).map_err(CliError::from)?;
        write_text(&formatted, self.output.as_deref())
    }
}
