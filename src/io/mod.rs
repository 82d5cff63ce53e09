//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `entry_reader` - Streaming CSV reader with iterator interface

pub mod csv_format;
pub mod entry_reader;

pub use csv_format::{
    convert_csv_record, format_amount, parse_amount, write_control_csv, write_entries_csv,
    CsvEntryRecord,
};
pub use entry_reader::EntryReader;
