//! Types module
//!
//! Contains the ACH record model used throughout the engine.
//! This module organizes types into logical submodules:
//! - `codes`: SEC codes, service class codes, transaction codes, categories
//! - `header`: Batch header record
//! - `entry`: Entry detail record, routing and trace numbers
//! - `addenda`: Addenda records, including the IAT block
//! - `control`: Batch control record
//! - `error`: Error types for the batch engine

pub mod addenda;
pub mod codes;
pub mod control;
pub mod entry;
pub mod error;
pub mod header;

pub use addenda::{
    Addenda02, Addenda05, Addenda10, Addenda11, Addenda12, Addenda13, Addenda14, Addenda15,
    Addenda16, Addenda17, Addenda18, Addenda98, Addenda99, InternationalDetail,
};
pub use codes::{
    AccountType, Category, Direction, PaymentType, SecCode, ServiceClassCode, TransactionCode,
    TransactionKind,
};
pub use control::BatchControl;
pub use entry::{EntryDetail, RoutingNumber, TraceNumber};
pub use error::{BatchError, ErrorKind, InclusionViolation};
pub use header::BatchHeader;
