//! Streaming CSV reader for entry details
//!
//! Reads entry rows one at a time and converts each through
//! `csv_format::convert_csv_record`.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Row parse and conversion errors are yielded as Err variants in the iterator
//! - Every yielded error carries the 1-based line number of the offending row
//!
//! ```no_run
//! use ach_batch_engine::io::EntryReader;
//! use std::path::Path;
//!
//! let reader = EntryReader::new(Path::new("entries.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(entry) => println!("Read entry for {}", entry.routing_number),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_csv_record, CsvEntryRecord};
use crate::types::{BatchError, EntryDetail};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// CSV reader yielding entry details
#[derive(Debug)]
pub struct EntryReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    line_num: u64,
}

impl EntryReader {
    /// Open a CSV file of entry rows
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing columns are optional)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file could not be opened and `CsvError` if
    /// the header row cannot be read.
    pub fn new(path: &Path) -> Result<Self, BatchError> {
        let file = File::open(path).map_err(|e| BatchError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            line_num: 1,
        })
    }

    /// Physical line on which the most recently read row starts (the header is line 1)
    pub fn line(&self) -> u64 {
        self.line_num
    }

    fn parse_record(&self) -> Result<EntryDetail, BatchError> {
        let csv_record: CsvEntryRecord = self.record.deserialize(Some(&self.headers))?;
        convert_csv_record(csv_record)
    }
}

impl Iterator for EntryReader {
    type Item = Result<EntryDetail, BatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => return None,
            Ok(true) => {}
            Err(e) => return Some(Err(BatchError::from(e))),
        }

        // Quoted fields may span lines and blank lines are skipped, so the
        // record position is the only reliable line number.
        self.line_num = match self.record.position() {
            Some(position) => position.line(),
            None => self.line_num + 1,
        };

        let line = self.line_num;
        Some(self.parse_record().map_err(|e| match e {
            BatchError::CsvError { message, .. } => BatchError::CsvError {
                line: Some(line),
                message,
            },
            other => BatchError::CsvError {
                line: Some(line),
                message: other.to_string(),
            },
        }))
    }
}
