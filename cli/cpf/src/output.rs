//! Output formatting for CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use cpf_core::CpfResult;
use tabled::{Table, Tabled};

/// Output format for result records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// Human-readable table.
    Table,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "CPF")]
    value: String,
    #[tabled(rename = "VALID")]
    valid: String,
    #[tabled(rename = "ERROR")]
    error: String,
    #[tabled(rename = "ORIGINAL")]
    original: String,
}

impl From<&CpfResult> for ResultRow {
    fn from(result: &CpfResult) -> Self {
        Self {
            value: result.value.clone(),
            valid: result
                .valid
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            error: result.error.clone().unwrap_or_else(|| "-".to_string()),
            original: result.original.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Render records in the given format.
pub fn render_records(records: &[CpfResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("Error marshaling JSON")
        }
        OutputFormat::Table => {
            if records.is_empty() {
                return Ok("No items found.".dimmed().to_string());
            }
            let rows: Vec<ResultRow> = records.iter().map(ResultRow::from).collect();
            Ok(Table::new(rows).to_string())
        }
    }
}

/// Write records to `output`, or to stdout when no path is given.
pub fn write_records(
    records: &[CpfResult],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render_records(records, format)?;
    write_text(&rendered, output)
}

/// Write text to `output` as is, or print it to stdout with a newline.
pub fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Error writing to file {:?}", path))?;
            tracing::debug!(path = %path.display(), "wrote output file");
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
            Ok(())
        }
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}
