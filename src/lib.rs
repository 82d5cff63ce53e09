//! ACH Batch Engine Library
//! # Overview
//!
//! This library assembles NACHA ACH batches: an ordered list of entry details
//! under one batch header, with a batch control derived from the entries. A
//! build assigns trace numbers, recomputes the control and validates the
//! batch against the rules of its Standard Entry Class (SEC) code.
//!
//! # Architecture
//!
//! - [`types`] - Records and codes (header, entry detail, addenda, control, errors)
//! - [`rules`] - Field inclusion rule library and the per-SEC-code policy table
//! - [`core`] - Batch lifecycle:
//!   - [`core::batch`] - Entry management, build and validate
//!   - [`core::sequence`] - Trace sequence sources
//! - [`io`] - CSV entry input and control/entry output
//! - [`pipeline`] - File-to-output orchestration used by the binary
//! - [`cli`] - CLI arguments parsing
//!
//! # Supported SEC Codes
//!
//! - **PPD**: Prearranged payments and deposits to consumer accounts
//! - **CCD**: Corporate credits and debits
//! - **CTX**: Corporate trade exchange, up to 9999 Addenda05 records per entry
//! - **WEB**: Internet-initiated entries, payment type code required
//! - **IAT**: International entries carrying the Addenda10-18 block
//!
//! # Example
//!
//! ```
//! use ach_batch_engine::{Batch, BatchHeader, EntryDetail, RoutingNumber, SecCode, TransactionCode};
//!
//! let header = BatchHeader::new(SecCode::Ctx, "Acme Corp", "1234567890", 12104288);
//! let mut batch = Batch::new(header).unwrap();
//! batch.add_entry(
//!     EntryDetail::new(
//!         TransactionCode::CheckingCredit,
//!         RoutingNumber::new(121042882).unwrap(),
//!         "123456789",
//!         10000,
//!     )
//!     .with_addenda05("Invoice 1"),
//! );
//!
//! let control = batch.build().unwrap();
//! assert_eq!(control.entry_addenda_count(), 2);
//! assert_eq!(control.entry_hash(), 121042882);
//! assert_eq!(control.total_credit(), 10000);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod rules;
pub mod types;

pub use core::{Batch, BatchState, CountingSequence, TraceSequence};
pub use pipeline::{BatchPipeline, OutputFormat, PipelineConfig};
pub use rules::{policy_for, SecPolicy};
pub use types::{
    BatchControl, BatchError, BatchHeader, EntryDetail, ErrorKind, RoutingNumber, SecCode,
    ServiceClassCode, TraceNumber, TransactionCode,
};
