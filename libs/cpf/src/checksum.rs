//! Normalization and check digit computation.
//!
//! A CPF has 9 significant digits followed by 2 check digits. Both check
//! digits come from the same weighted sum over the reversed base, with the
//! second pass shifted by one position and folding in the first digit.

use crate::CpfError;

/// Number of digits in a canonical CPF.
pub const CPF_LEN: usize = 11;

/// Number of significant digits (the base the check digits are derived from).
pub const BASE_LEN: usize = 9;

/// Removes every character that is not an ASCII decimal digit.
///
/// No length is enforced here, so the result may be empty.
pub fn normalize(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Returns true if `s` is non-empty and made of a single repeated character.
pub fn is_repeated_single_char(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Sums `digit[i] * (9 - (i % 10))` over the sequence.
pub fn weighted_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (9 - (i % 10) as u32))
        .sum()
}

/// Computes the two check digits for a 9 digit base.
pub fn check_digits(base: &[u8]) -> Result<(u8, u8), CpfError> {
    if base.len() != BASE_LEN {
        return Err(CpfError::InvalidLength {
            expected: BASE_LEN,
            actual: base.len(),
        });
    }

    let mut shifted: Vec<u8> = Vec::with_capacity(BASE_LEN + 1);
    shifted.push(0);
    shifted.extend(base.iter().rev());

    // `% 11 % 10` maps a remainder of 10 to 0; it is not a single modulo.
    let d1 = weighted_sum(&shifted[1..]) % 11 % 10;
    let d2 = (weighted_sum(&shifted) + d1 * 9) % 11 % 10;

    Ok((d1 as u8, d2 as u8))
}

/// Converts a digit-only string into digit values.
///
/// Returns `None` if any character is not an ASCII digit.
pub(crate) fn to_digits(s: &str) -> Option<Vec<u8>> {
    s.chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}
