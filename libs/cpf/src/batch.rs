//! Batch processing over sequences of lines.
//!
//! Every non-blank line produces exactly one [`CpfResult`], in input order.
//! Per-line failures are recorded in the result instead of aborting the
//! batch; only a failure to read the input fails the whole batch.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::TryRngCore;
use serde::{Deserialize, Serialize};

use crate::canonical::{format, validate};
use crate::generate::CpfEngine;
use crate::CpfError;

/// Outcome of one operation over one input.
///
/// Optional fields are omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpfResult {
    /// The resulting value (formatted, generated, or the input itself).
    pub value: String,

    /// Validation outcome, when validation ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,

    /// Failure description, when the operation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The input line the result was produced from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl CpfResult {
    /// A result carrying only a value, as produced by generation.
    pub fn generated(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            valid: None,
            error: None,
            original: None,
        }
    }

    /// Returns true if the operation failed or the value is not valid.
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.valid == Some(false)
    }
}

/// An operation applied to each line of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Validate the line; `length_only` skips the check digits.
    Validate { length_only: bool },
    /// Format the line as `###.###.###-##`.
    Format,
}

impl Operation {
    /// Full checksum validation.
    pub const VALIDATE: Self = Operation::Validate { length_only: false };

    /// Applies the operation to a single input.
    pub fn apply(&self, input: &str) -> CpfResult {
        match *self {
            Operation::Validate { length_only } => CpfResult {
                value: input.to_string(),
                valid: Some(validate(input, length_only)),
                error: None,
                original: Some(input.to_string()),
            },
            Operation::Format => match format(input) {
                Ok(formatted) => CpfResult {
                    value: formatted,
                    valid: None,
                    error: None,
                    original: Some(input.to_string()),
                },
                Err(e) => CpfResult {
                    value: input.to_string(),
                    valid: None,
                    error: Some(e.to_string()),
                    original: Some(input.to_string()),
                },
            },
        }
    }
}

/// Applies `op` to every non-blank line.
///
/// Lines are trimmed before processing; lines that are empty after trimming
/// produce no result.
pub fn process_lines<I, S>(lines: I, op: Operation) -> Vec<CpfResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            (!line.is_empty()).then(|| op.apply(line))
        })
        .collect()
}

/// Applies `op` to every non-blank line read from `reader`.
pub fn process_reader<R: BufRead>(reader: R, op: Operation) -> Result<Vec<CpfResult>, CpfError> {
    let mut results = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        results.push(op.apply(line));
    }
    tracing::debug!(count = results.len(), ?op, "processed batch");
    Ok(results)
}

/// Applies `op` to every non-blank line of the file at `path`.
pub fn process_file(path: impl AsRef<Path>, op: Operation) -> Result<Vec<CpfResult>, CpfError> {
    let file = File::open(path.as_ref())?;
    process_reader(BufReader::new(file), op)
}

impl<R: TryRngCore> CpfEngine<R> {
    /// Generates `count` CPFs as results.
    ///
    /// Fails on the first generation error; no partial batch is returned.
    pub fn generate_batch(
        &mut self,
        count: usize,
        formatted: bool,
        invalid: bool,
    ) -> Result<Vec<CpfResult>, CpfError> {
        (0..count)
            .map(|_| self.generate(formatted, invalid).map(CpfResult::generated))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_validate_batch_scenario() {
        let lines = ["529.982.247-25", "111.111.111-11", "123.456.789-09", ""];
        let results = process_lines(lines, Operation::VALIDATE);

        assert_eq!(results.len(), 3);
        let validity: Vec<_> = results.iter().map(|r| r.valid).collect();
        assert_eq!(validity, vec![Some(true), Some(false), Some(true)]);
        for (result, line) in results.iter().zip(lines) {
            assert_eq!(result.original.as_deref(), Some(line));
            assert_eq!(result.value, line);
            assert!(result.error.is_none());
        }
    }

    #[test]
    fn test_blank_lines_skipped() {
        let results = process_lines(["", "   ", "\t", "52998224725", " "], Operation::Format);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, "529.982.247-25");
    }

    #[test]
    fn test_lines_are_trimmed() {
        let results = process_lines(["  52998224725  "], Operation::VALIDATE);
        assert_eq!(results[0].original.as_deref(), Some("52998224725"));
        assert_eq!(results[0].valid, Some(true));
    }

    #[test]
    fn test_format_batch_captures_errors() {
        let results = process_lines(["52998224725", "123", "123.456.789-09"], Operation::Format);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].value, "529.982.247-25");
        assert!(results[0].error.is_none());
        assert_eq!(results[0].original.as_deref(), Some("52998224725"));

        assert_eq!(results[1].value, "123");
        assert!(results[1].error.as_deref().unwrap().contains("11 digits"));
        assert!(results[1].is_failure());

        assert_eq!(results[2].value, "123.456.789-09");
        assert!(!results[2].is_failure());
    }

    #[test]
    fn test_validate_length_only_operation() {
        let op = Operation::Validate { length_only: true };
        let results = process_lines(["12345678901", "11111111111"], op);
        assert_eq!(results[0].valid, Some(true));
        assert_eq!(results[1].valid, Some(false));
    }

    #[test]
    fn test_process_reader() {
        let input = Cursor::new("529.982.247-25\n\n113.111.111-11\r\n");
        let results = process_reader(input, Operation::VALIDATE).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].valid, Some(true));
        assert_eq!(results[1].valid, Some(false));
        assert_eq!(results[1].original.as_deref(), Some("113.111.111-11"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_process_reader_read_failure() {
        let reader = io::BufReader::new(FailingReader);
        let err = process_reader(reader, Operation::VALIDATE).unwrap_err();
        assert!(matches!(err, CpfError::Io(_)));
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpfs.txt");
        std::fs::write(&path, "52998224725\n\n12345678900\n").unwrap();

        let results = process_file(&path, Operation::Format).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].value, "123.456.789-00");
    }

    #[test]
    fn test_process_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_file(dir.path().join("missing.txt"), Operation::Format).unwrap_err();
        assert!(matches!(err, CpfError::Io(_)));
    }

    #[test]
    fn test_generate_batch() {
        let mut engine = CpfEngine::with_rng(StdRng::seed_from_u64(3));
        let results = engine.generate_batch(25, true, false).unwrap();
        assert_eq!(results.len(), 25);
        for result in &results {
            assert!(validate(&result.value, false));
            assert!(result.valid.is_none());
            assert!(result.error.is_none());
            assert!(result.original.is_none());
        }
    }

    #[test]
    fn test_generate_batch_zero() {
        let mut engine = CpfEngine::new();
        assert!(engine.generate_batch(0, false, false).unwrap().is_empty());
    }

    #[test]
    fn test_result_serialization_omits_absent_fields() {
        let generated = serde_json::to_value(CpfResult::generated("52998224725")).unwrap();
        assert_eq!(generated, serde_json::json!({ "value": "52998224725" }));

        let validated = serde_json::to_value(Operation::VALIDATE.apply("113.111.111-11")).unwrap();
        assert_eq!(
            validated,
            serde_json::json!({
                "value": "113.111.111-11",
                "valid": false,
                "original": "113.111.111-11"
            })
        );

        let failed = serde_json::to_value(Operation::Format.apply("123")).unwrap();
        assert_eq!(failed["value"], "123");
        assert!(failed.get("valid").is_none());
        assert!(failed["error"].is_string());
    }
}
