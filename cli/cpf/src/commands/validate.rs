//! Validate command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cpf_core::{process_file, Operation};

use crate::error::CliError;
use crate::output::write_records;

use super::CommandContext;

/// Validate a CPF, or every line of a file.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// CPF to validate; punctuation is ignored.
    #[arg(conflicts_with = "file")]
    cpf: Option<String>,

    /// Validate CPFs from a file (one per line).
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Only check the digit count and repeated digits, not the check digits.
    #[arg(long)]
    length_only: bool,

    /// Write output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let op = Operation::Validate {
            length_only: self.length_only,
        };

        let results = match (&self.file, &self.cpf) {
            (Some(path), _) => process_file(path, op)
                .with_context(|| format!("failed to process {}", path.display()))?,
            (None, Some(cpf)) => vec![op.apply(cpf)],
            (None, None) => return Err(CliError::MissingCpf("validate").into()),
        };

        write_records(&results, ctx.format, self.output.as_deref())
    }
}
