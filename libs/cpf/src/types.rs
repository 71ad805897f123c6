//! The typed canonical CPF.

use crate::checksum::{
    check_digits, is_repeated_single_char, normalize, to_digits, BASE_LEN, CPF_LEN,
};
use crate::canonical::format_digits;
use crate::CpfError;

/// A canonical, checksum-valid CPF.
///
/// Holds the 11 digits without separators. Displays in the formatted
/// `###.###.###-##` form and parses from any text whose digits form a valid
/// CPF.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Parses and validates a CPF.
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        let digits = normalize(s);
        if digits.len() != CPF_LEN {
            return Err(CpfError::InvalidLength {
                expected: CPF_LEN,
                actual: digits.len(),
            });
        }
        if is_repeated_single_char(&digits) {
            return Err(CpfError::RepeatedDigits);
        }

        let (base, suffix) = digits.split_at(BASE_LEN);
        let base = to_digits(base).ok_or(CpfError::InvalidLength {
            expected: CPF_LEN,
            actual: digits.len(),
        })?;
        let (d1, d2) = check_digits(&base)?;
        let expected = format!("{d1}{d2}");
        if suffix != expected {
            return Err(CpfError::ChecksumMismatch {
                expected,
                actual: suffix.to_string(),
            });
        }

        Ok(Self(digits))
    }

    /// Builds a CPF from its 9 digit base, computing the check digits.
    pub fn from_base(base: &str) -> Result<Self, CpfError> {
        let values = to_digits(base)
            .filter(|values| values.len() == BASE_LEN)
            .ok_or_else(|| CpfError::InvalidLength {
                expected: BASE_LEN,
                actual: normalize(base).len(),
            })?;
        let (d1, d2) = check_digits(&values)?;
        let digits = format!("{base}{d1}{d2}");
        if is_repeated_single_char(&digits) {
            return Err(CpfError::RepeatedDigits);
        }
        Ok(Self(digits))
    }

    /// Returns the 11 digits without separators.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Returns the 9 significant digits.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.0[..BASE_LEN]
    }

    /// Returns the 2 check digits.
    #[must_use]
    pub fn check_digits(&self) -> &str {
        &self.0[BASE_LEN..]
    }

    /// Returns the `###.###.###-##` form.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_digits(&self.0)
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Cpf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> serde::Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
