//! Generate command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use crate::output::{write_records, write_text};

use super::CommandContext;

const DEFAULT_SEPARATOR: &str = "\n";

/// Generate random CPFs.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Generate CPFs with random (most likely wrong) check digits.
    #[arg(long)]
    invalid: bool,

    /// Emit digits only, without punctuation.
    #[arg(long)]
    unformatted: bool,

    /// Number of CPFs to generate.
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    count: String,

    /// Separator between multiple CPFs (default: newline).
    #[arg(long, default_value = DEFAULT_SEPARATOR, hide_default_value = true)]
    separator: String,

    /// Output result records instead of plain text.
    #[arg(long)]
    json: bool,

    /// Write output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn parse_count(s: &str) -> Result<usize, CliError> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::InvalidCount(s.to_string())),
    }
}

impl GenerateCommand {
    pub fn run(self, ctx: &mut CommandContext) -> Result<()> {
        let count = parse_count(&self.count)?;
        let formatted = !self.unformatted;
        let results = ctx
            .engine
            .generate_batch(count, formatted, self.invalid)
            .map_err(CliError::from)?;
        tracing::debug!(count = results.len(), invalid = self.invalid, "generated CPFs");

        if self.json {
            return write_records(&results, ctx.format, self.output.as_deref());
        }

        let joined = results
            .iter()
            .map(|r| r.value.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator);

        if self.separator == DEFAULT_SEPARATOR {
            return write_text(&joined, self.output.as_deref());
        }

        match self.output.as_deref() {
            Some(path) => write_text(&joined, Some(path)),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(joined.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}
