//! Error types for CPF parsing, formatting, and generation.

use std::io;

use thiserror::Error;

/// Errors that can occur when working with CPF numbers.
#[derive(Debug, Error)]
pub enum CpfError {
    /// The normalized input does not have the required number of digits.
    #[error("invalid CPF number (must have {expected} digits, got {actual})")]
    InvalidLength { expected: usize, actual: usize },

    /// Every digit is the same (e.g. `000.000.000-00`).
    #[error("invalid CPF number (all digits are the same)")]
    RepeatedDigits,

    /// The check digits do not match the ones computed from the base.
    #[error("invalid CPF check digits: expected '{expected}', got '{actual}'")]
    ChecksumMismatch { expected: String, actual: String },

    /// The random source failed or an internal invariant was broken.
    #[error("failed to generate CPF: {0}")]
    Generation(String),

    /// Reading batch input failed.
    #[error("error reading input: {0}")]
    Io(#[from] io::Error),
}

impl CpfError {
    /// Returns true if this error is a digit count mismatch.
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, CpfError::InvalidLength { .. })
    }

    /// Returns true if the input had the right shape but is not a valid CPF.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            CpfError::RepeatedDigits | CpfError::ChecksumMismatch { .. }
        )
    }

    /// Short, value-free name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CpfError::InvalidLength { .. } => "invalid_length",
            CpfError::RepeatedDigits => "repeated_digits",
            CpfError::ChecksumMismatch { .. } => "checksum_mismatch",
            CpfError::Generation(_) => "generation",
            CpfError::Io(_) => "io",
        }
    }
}
