//! Formatting and validation of CPF strings.

use crate::checksum::{
    check_digits, is_repeated_single_char, normalize, to_digits, BASE_LEN, CPF_LEN,
};
use crate::CpfError;

/// Formats a CPF as `###.###.###-##`.
///
/// Only the digit count is checked; the check digits are not verified.
pub fn format(text: &str) -> Result<String, CpfError> {
    let digits = normalize(text);
    if digits.len() != CPF_LEN {
        return Err(CpfError::InvalidLength {
            expected: CPF_LEN,
            actual: digits.len(),
        });
    }
    Ok(format_digits(&digits))
}

/// Groups 11 ASCII digits as `###.###.###-##`.
pub(crate) fn format_digits(digits: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Checks whether `text` is a valid CPF.
///
/// With `length_only`, only the digit count and the repeated-digit rule are
/// checked; the check digits are ignored.
pub fn validate(text: &str, length_only: bool) -> bool {
    let digits = normalize(text);
    if digits.len() != CPF_LEN {
        return false;
    }
    if is_repeated_single_char(&digits) {
        return false;
    }
    if length_only {
        return true;
    }

    let (base, suffix) = digits.split_at(BASE_LEN);
    let Some(base) = to_digits(base) else {
        return false;
    };
    match check_digits(&base) {
        Ok((d1, d2)) => suffix == format!("{d1}{d2}"),
        Err(_) => false,
    }
}
