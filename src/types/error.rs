//! Error types for the ACH batch engine
//!
//! Every check in the engine reports a specific `BatchError` variant carrying
//! enough context (entry index, field name, expected and actual values) to be
//! shown verbatim to an operator.
//!
//! # Error Categories
//!
//! Variants are grouped by [`ErrorKind`]:
//!
//! - **Structural**: empty batch, invalid header, control requested before build
//! - **SecMismatch**: header SEC code differs from the batch's declared SEC code
//! - **AddendaCount**: addenda capacity exceeded or recorded count mismatch
//! - **TransactionCode**: code forbidden by the SEC policy or the service class
//! - **FieldInclusion**: a field present when it must be blank, or the reverse
//! - **Sequence**: trace sequence values out of range or not increasing
//! - **Control**: an entry amount or control total that no longer fits its field
//! - **Input**: parse, CSV and I/O failures outside the engine proper

use super::codes::{SecCode, ServiceClassCode, TransactionCode};
use std::fmt;
use thiserror::Error;

/// Which way a field-inclusion rule was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionViolation {
    /// The field is set but must be blank
    UnexpectedlyPresent,
    /// The field is blank but is required
    UnexpectedlyBlank,
}

impl fmt::Display for InclusionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InclusionViolation::UnexpectedlyPresent => f.write_str("must be blank"),
            InclusionViolation::UnexpectedlyBlank => f.write_str("is required"),
        }
    }
}

/// Error taxonomy bucket for a [`BatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    SecMismatch,
    AddendaCount,
    TransactionCode,
    FieldInclusion,
    Sequence,
    Control,
    Input,
}

/// Main error type for the batch engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// The batch holds no entries
    ///
    /// Informational: an empty batch still builds to a zero control.
    #[error("Batch has no entries")]
    EmptyBatch,

    /// A header field failed its shape check when the batch was created
    #[error("Invalid batch header field {field}: {reason}")]
    InvalidHeader {
        field: &'static str,
        reason: String,
    },

    /// The control was requested while the batch is not in the validated state
    #[error("Batch control is not current (batch state: {state})")]
    NotBuilt { state: String },

    /// Header SEC code does not match the SEC code the batch was declared with
    #[error("Header SEC code {header} does not match batch type {declared}")]
    SecCodeMismatch { header: SecCode, declared: SecCode },

    /// More addenda records of one type than the policy allows
    #[error("Entry {index}: {addenda} count {count} exceeds limit of {limit}")]
    AddendaCountExceeded {
        index: usize,
        addenda: &'static str,
        count: usize,
        limit: usize,
    },

    /// The recorded addenda count sub-field disagrees with the attached Addenda05 records
    #[error("Entry {index}: recorded addenda count {recorded} does not match {actual} Addenda05 records")]
    AddendaCountMismatch {
        index: usize,
        recorded: usize,
        actual: usize,
    },

    /// Transaction code is not permitted for the batch's SEC code
    #[error("Entry {index}: transaction code {code} is not permitted in {sec_code} batches")]
    ForbiddenTransactionCode {
        index: usize,
        code: TransactionCode,
        sec_code: SecCode,
    },

    /// Transaction code direction is not permitted by the service class code
    #[error("Entry {index}: transaction code {code} is not valid for service class code {service_class}")]
    ServiceClassMismatch {
        index: usize,
        code: TransactionCode,
        service_class: ServiceClassCode,
    },

    /// A field is present when it must be blank, or blank when it is required
    #[error("Entry {index}: {field} {violation}")]
    FieldInclusion {
        index: usize,
        field: &'static str,
        violation: InclusionViolation,
    },

    /// The sequence source produced a value outside 1..=9999999
    #[error("Entry {index}: sequence number {sequence} is out of range")]
    InvalidSequence { index: usize, sequence: u32 },

    /// The sequence source produced a value not greater than the previous one
    #[error("Entry {index}: sequence number {next} does not follow {previous}")]
    SequenceNotMonotonic {
        index: usize,
        previous: u32,
        next: u32,
    },

    /// An entry amount that does not fit the 10-digit amount field
    #[error("Entry {index}: amount {amount} exceeds the 10-digit amount field")]
    AmountOutOfRange { index: usize, amount: u64 },

    /// A control field no longer fits its fixed width
    #[error("Batch control {field} exceeds its field capacity")]
    ControlOverflow { field: &'static str },

    #[error("Unknown SEC code '{code}'")]
    UnknownSecCode { code: String },

    #[error("Unknown transaction code {code}")]
    UnknownTransactionCode { code: u8 },

    #[error("Unknown service class code {code}")]
    UnknownServiceClassCode { code: u16 },

    #[error("Invalid routing number '{value}'")]
    InvalidRoutingNumber { value: String },

    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    #[error("Invalid payment type '{value}'")]
    InvalidPaymentType { value: String },

    #[error("Invalid date '{value}'")]
    InvalidDate { value: String },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// CSV error while reading input or writing output
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    CsvError { line: Option<u64>, message: String },
}

impl From<std::io::Error> for BatchError {
    fn from(error: std::io::Error) -> Self {
        BatchError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BatchError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BatchError::CsvError {
            line,
            message: error.to_string(),
        }
    }
}

impl BatchError {
    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BatchError::EmptyBatch
            | BatchError::InvalidHeader { .. }
            | BatchError::NotBuilt { .. } => ErrorKind::Structural,
            BatchError::SecCodeMismatch { .. } => ErrorKind::SecMismatch,
            BatchError::AddendaCountExceeded { .. } | BatchError::AddendaCountMismatch { .. } => {
                ErrorKind::AddendaCount
            }
            BatchError::ForbiddenTransactionCode { .. }
            | BatchError::ServiceClassMismatch { .. } => ErrorKind::TransactionCode,
            BatchError::FieldInclusion { .. } => ErrorKind::FieldInclusion,
            BatchError::InvalidSequence { .. } | BatchError::SequenceNotMonotonic { .. } => {
                ErrorKind::Sequence
            }
            BatchError::AmountOutOfRange { .. } | BatchError::ControlOverflow { .. } => {
                ErrorKind::Control
            }
            BatchError::UnknownSecCode { .. }
            | BatchError::UnknownTransactionCode { .. }
            | BatchError::UnknownServiceClassCode { .. }
            | BatchError::InvalidRoutingNumber { .. }
            | BatchError::InvalidAmount { .. }
            | BatchError::InvalidPaymentType { .. }
            | BatchError::InvalidDate { .. }
            | BatchError::IoError { .. }
            | BatchError::CsvError { .. } => ErrorKind::Input,
        }
    }

    /// Zero-based position of the offending entry, for entry-level errors
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            BatchError::AddendaCountExceeded { index, .. }
            | BatchError::AddendaCountMismatch { index, .. }
            | BatchError::ForbiddenTransactionCode { index, .. }
            | BatchError::ServiceClassMismatch { index, .. }
            | BatchError::FieldInclusion { index, .. }
            | BatchError::InvalidSequence { index, .. }
            | BatchError::SequenceNotMonotonic { index, .. }
            | BatchError::AmountOutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Create an AddendaCountExceeded error
    pub fn addenda_count_exceeded(
        index: usize,
        addenda: &'static str,
        count: usize,
        limit: usize,
    ) -> Self {
        BatchError::AddendaCountExceeded {
            index,
            addenda,
            count,
            limit,
        }
    }

    /// Create a FieldInclusion error for a field that must be blank
    pub fn unexpectedly_present(index: usize, field: &'static str) -> Self {
        BatchError::FieldInclusion {
            index,
            field,
            violation: InclusionViolation::UnexpectedlyPresent,
        }
    }

    /// Create a FieldInclusion error for a required field that is blank
    pub fn unexpectedly_blank(index: usize, field: &'static str) -> Self {
        BatchError::FieldInclusion {
            index,
            field,
            violation: InclusionViolation::UnexpectedlyBlank,
        }
    }

    /// Create an InvalidHeader error
    pub fn invalid_header(field: &'static str, reason: &str) -> Self {
        BatchError::InvalidHeader {
            field,
            reason: reason.to_string(),
        }
    }
}
