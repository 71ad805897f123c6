//! Error handling and display for the CLI.

use colored::Colorize;
use cpf_core::CpfError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing CPF to {0}.")]
    MissingCpf(&'static str),

    #[error("Invalid count value '{0}'. Must be a positive number.")]
    InvalidCount(String),

    #[error("Could not determine config directory")]
    ConfigDirUnavailable,

    #[error(transparent)]
    Cpf(#[from] CpfError),
}

impl CliError {
    /// Short, value-free name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::MissingCpf(_) => "missing_cpf",
            CliError::InvalidCount(_) => "invalid_count",
            CliError::ConfigDirUnavailable => "config_dir_unavailable",
            CliError::Cpf(e) => e.kind(),
        }
    }
}

/// Value-free error kind suitable for reporting.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.kind();
    }
    if let Some(cpf_err) = err.downcast_ref::<CpfError>() {
        return cpf_err.kind();
    }
    "other"
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let hint = match err.downcast_ref::<CliError>() {
        Some(CliError::MissingCpf(_)) => {
            Some("Hint: Pass a CPF as an argument or use --file to read one per line.")
        }
        Some(CliError::ConfigDirUnavailable) => {
            Some("Hint: Set CPF_CONFIG_DIR to choose a config directory.")
        }
        Some(CliError::Cpf(CpfError::InvalidLength { .. })) => {
            Some("Hint: A CPF has 11 digits, e.g. 529.982.247-25.")
        }
        _ => match err.downcast_ref::<CpfError>() {
            Some(CpfError::InvalidLength { .. }) => {
                Some("Hint: A CPF has 11 digits, e.g. 529.982.247-25.")
            }
            _ => None,
        },
    };

    if let Some(hint) = hint {
        eprintln!("\n{}", hint.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = anyhow::Error::from(CliError::InvalidCount("0".to_string()));
        assert_eq!(error_kind(&err), "invalid_count");

        let err = anyhow::Error::from(CpfError::InvalidLength {
            expected: 11,
            actual: 3,
        });
        assert_eq!(error_kind(&err), "invalid_length");

        let err = anyhow::anyhow!("boom");
        assert_eq!(error_kind(&err), "other");
    }

    #[test]
    fn test_error_kind_through_context() {
        use anyhow::Context;

        let result: Result<(), CpfError> = Err(CpfError::Generation("rng".to_string()));
        let err = result.context("generating").unwrap_err();
        assert_eq!(error_kind(&err), "generation");
    }

    #[test]
    fn test_missing_cpf_message() {
        assert_eq!(
            CliError::MissingCpf("validate").to_string(),
            "Missing CPF to validate."
        );
    }
}
