//! Batch header record

use super::codes::{SecCode, ServiceClassCode};
use super::error::BatchError;
use chrono::NaiveDate;

/// Largest value an 8-digit ODFI identification can hold
pub const MAX_ODFI_IDENTIFICATION: u32 = 99_999_999;

/// Largest value the 7-digit batch number can hold
pub const MAX_BATCH_NUMBER: u32 = 9_999_999;

/// Batch header record
///
/// Identifies the originator, the SEC code and the ODFI of a batch. A batch
/// takes ownership of its header on creation and never hands out a mutable
/// reference to it again.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchHeader {
    /// Restricts the direction of entries in the batch
    pub service_class_code: ServiceClassCode,

    /// Originator name (16 characters in the encoded record)
    pub company_name: String,

    /// Free-form originator data
    pub company_discretionary_data: String,

    /// Originator identification, usually a tax ID prefixed with `1`
    pub company_identification: String,

    /// Standard Entry Class code shared by every entry
    pub sec_code: SecCode,

    /// Description shown on the receiver's statement, e.g. `PAYROLL`
    pub company_entry_description: String,

    /// Date the originator intends the entries to settle
    pub effective_entry_date: NaiveDate,

    /// First 8 digits of the originating DFI's routing number
    ///
    /// Also the prefix of every trace number in the batch.
    pub odfi_identification: u32,

    /// Batch number within the enclosing file
    pub batch_number: u32,
}

impl BatchHeader {
    /// Create a header for a mixed debit/credit batch
    ///
    /// The entry description defaults to `PAYMENT`, the effective entry date
    /// to today and the batch number to 1.
    pub fn new(
        sec_code: SecCode,
        company_name: &str,
        company_identification: &str,
        odfi_identification: u32,
    ) -> Self {
        BatchHeader {
            service_class_code: ServiceClassCode::MixedDebitsAndCredits,
            company_name: company_name.to_string(),
            company_discretionary_data: String::new(),
            company_identification: company_identification.to_string(),
            sec_code,
            company_entry_description: "PAYMENT".to_string(),
            effective_entry_date: chrono::Local::now().date_naive(),
            odfi_identification,
            batch_number: 1,
        }
    }

    pub fn with_service_class(mut self, service_class_code: ServiceClassCode) -> Self {
        self.service_class_code = service_class_code;
        self
    }

    pub fn with_entry_description(mut self, description: &str) -> Self {
        self.company_entry_description = description.to_string();
        self
    }

    pub fn with_effective_entry_date(mut self, date: NaiveDate) -> Self {
        self.effective_entry_date = date;
        self
    }

    pub fn with_batch_number(mut self, batch_number: u32) -> Self {
        self.batch_number = batch_number;
        self
    }

    /// Check the header fields the engine depends on
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` naming the first field that is blank or does
    /// not fit its fixed width.
    pub fn check(&self) -> Result<(), BatchError> {
        if self.company_name.trim().is_empty() {
            return Err(BatchError::invalid_header("company_name", "must not be blank"));
        }
        if self.company_identification.trim().is_empty() {
            return Err(BatchError::invalid_header(
                "company_identification",
                "must not be blank",
            ));
        }
        if self.company_entry_description.trim().is_empty() {
            return Err(BatchError::invalid_header(
                "company_entry_description",
                "must not be blank",
            ));
        }
        if self.odfi_identification == 0 || self.odfi_identification > MAX_ODFI_IDENTIFICATION {
            return Err(BatchError::invalid_header(
                "odfi_identification",
                "must be a non-zero 8-digit number",
            ));
        }
        if self.batch_number > MAX_BATCH_NUMBER {
            return Err(BatchError::invalid_header(
                "batch_number",
                "must fit in 7 digits",
            ));
        }
        Ok(())
    }
}

/// Parse an effective entry date in the header's `YYMMDD` form
pub fn parse_effective_date(value: &str) -> Result<NaiveDate, BatchError> {
    NaiveDate::parse_from_str(value.trim(), "%y%m%d").map_err(|_| BatchError::InvalidDate {
        value: value.to_string(),
    })
}
