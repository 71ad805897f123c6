//! Random CPF generation.
//!
//! The engine owns its random source. Production code uses the operating
//! system CSPRNG; tests can plug in a seeded generator for reproducible
//! output.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::checksum::{check_digits, is_repeated_single_char, BASE_LEN, CPF_LEN};
use crate::canonical::format;
use crate::CpfError;

/// Draws at or above this bound are rejected so every digit is equally likely.
const DIGIT_ZONE: u32 = u32::MAX - u32::MAX % 10;

/// Generates CPF numbers from a random source.
#[derive(Debug)]
pub struct CpfEngine<R = OsRng> {
    rng: R,
}

impl CpfEngine<OsRng> {
    /// Creates an engine backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for CpfEngine<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TryRngCore> CpfEngine<R> {
    /// Creates an engine backed by the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a random CPF.
    ///
    /// With `invalid`, the check digits are drawn at random instead of being
    /// computed. Roughly one in a hundred of those still happens to be valid.
    pub fn generate(&mut self, formatted: bool, invalid: bool) -> Result<String, CpfError> {
        let raw = loop {
            let raw = self.draw(invalid)?;
            // A valid draw must also pass validation, which rejects repeats.
            if invalid || !is_repeated_single_char(&raw) {
                break raw;
            }
        };

        if formatted {
            format(&raw).map_err(|e| CpfError::Generation(format!("failed to format CPF: {e}")))
        } else {
            Ok(raw)
        }
    }

    /// Draws the 9 base digits plus 2 check digits as a digit string.
    fn draw(&mut self, invalid: bool) -> Result<String, CpfError> {
        let mut digits = [0u8; CPF_LEN];
        for slot in digits.iter_mut().take(BASE_LEN) {
            *slot = self.next_digit()?;
        }

        let (d1, d2) = if invalid {
            (self.next_digit()?, self.next_digit()?)
        } else {
            check_digits(&digits[..BASE_LEN]).map_err(|e| {
                CpfError::Generation(format!("failed to compute check digits: {e}"))
            })?
        };
        digits[BASE_LEN] = d1;
        digits[BASE_LEN + 1] = d2;

        Ok(digits.iter().map(|&d| char::from(b'0' + d)).collect())
    }

    /// Draws a uniformly distributed digit in `0..=9`.
    fn next_digit(&mut self) -> Result<u8, CpfError> {
        loop {
            let n = self.rng.try_next_u32().map_err(|e| {
                tracing::debug!(error = %e, "random source failed");
                CpfError::Generation(format!("failed to generate random digit: {e}"))
            })?;
            if n < DIGIT_ZONE {
                return Ok((n % 10) as u8);
            }
        }
    }
}
