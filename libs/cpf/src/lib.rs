//! # cpf-core
//!
//! Parsing, check digits, validation, and generation of CPF numbers (the
//! Brazilian individual taxpayer registry).
//!
//! ## Format
//!
//! A CPF has 11 digits: 9 significant digits followed by 2 check digits,
//! usually written as `###.###.###-##`:
//!
//! - `529.982.247-25`
//! - `52998224725`
//!
//! Inputs are normalized by dropping every character that is not an ASCII
//! digit, so both forms above are accepted everywhere. A number made of a
//! single repeated digit (e.g. `111.111.111-11`) is never valid.
//!
//! ## Layout
//!
//! - [`checksum`]: normalization and the check digit algorithm
//! - [`format`] and [`validate`]: single-value operations
//! - [`Cpf`]: a typed, always-valid CPF
//! - [`CpfEngine`]: random generation backed by a CSPRNG
//! - [`process_lines`] and friends: batch processing into [`CpfResult`]s

pub mod checksum;

mod batch;
mod canonical;
mod error;
mod generate;
mod types;

pub use batch::{process_file, process_lines, process_reader, CpfResult, Operation};
pub use canonical::{format, validate};
pub use checksum::{check_digits, is_repeated_single_char, normalize, weighted_sum};
pub use error::CpfError;
pub use generate::CpfEngine;
pub use types::Cpf;
