//! Batch control record
//!
//! The control is derived data: it is created zeroed alongside a batch and
//! recomputed wholesale from the entry list by `Batch::build`. Its fields have
//! no setters.

use super::codes::{Direction, SecCode, ServiceClassCode};
use super::entry::EntryDetail;
use super::error::BatchError;
use super::header::BatchHeader;

/// Modulus applied to the routing number sum (10-digit entry hash field)
pub const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

/// Largest value the 6-digit entry/addenda count field can hold
pub const MAX_ENTRY_ADDENDA_COUNT: usize = 999_999;

/// Largest value a 12-digit total amount field can hold, in cents
pub const MAX_TOTAL_AMOUNT: u64 = 999_999_999_999;

/// Batch control record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchControl {
    service_class_code: ServiceClassCode,
    sec_code: SecCode,
    entry_addenda_count: usize,
    entry_hash: u64,
    total_debit: u64,
    total_credit: u64,
    company_identification: String,
    odfi_identification: u32,
    batch_number: u32,
}

impl BatchControl {
    /// Zero control carrying the header's identifying fields
    pub(crate) fn empty(header: &BatchHeader) -> Self {
        BatchControl {
            service_class_code: header.service_class_code,
            sec_code: header.sec_code,
            entry_addenda_count: 0,
            entry_hash: 0,
            total_debit: 0,
            total_credit: 0,
            company_identification: header.company_identification.clone(),
            odfi_identification: header.odfi_identification,
            batch_number: header.batch_number,
        }
    }

    /// Compute a control from the header and the full entry list
    ///
    /// # Errors
    ///
    /// Returns `ControlOverflow` when the entry/addenda count or either total
    /// no longer fits its fixed-width field.
    pub(crate) fn tabulate(
        header: &BatchHeader,
        entries: &[EntryDetail],
    ) -> Result<Self, BatchError> {
        let mut control = BatchControl::empty(header);
        let mut routing_sum: u64 = 0;

        for entry in entries {
            control.entry_addenda_count += 1 + entry.addenda_record_count();
            routing_sum = (routing_sum + u64::from(entry.routing_number.value()))
                % ENTRY_HASH_MODULUS;

            let total = match entry.transaction_code.direction() {
                Direction::Debit => &mut control.total_debit,
                Direction::Credit => &mut control.total_credit,
            };
            *total = total
                .checked_add(entry.amount)
                .filter(|sum| *sum <= MAX_TOTAL_AMOUNT)
                .ok_or(BatchError::ControlOverflow {
                    field: match entry.transaction_code.direction() {
                        Direction::Debit => "total_debit",
                        Direction::Credit => "total_credit",
                    },
                })?;
        }

        if control.entry_addenda_count > MAX_ENTRY_ADDENDA_COUNT {
            return Err(BatchError::ControlOverflow {
                field: "entry_addenda_count",
            });
        }
        control.entry_hash = routing_sum;

        Ok(control)
    }

    pub fn service_class_code(&self) -> ServiceClassCode {
        self.service_class_code
    }

    pub fn sec_code(&self) -> SecCode {
        self.sec_code
    }

    /// Entries plus every addenda record attached to them
    pub fn entry_addenda_count(&self) -> usize {
        self.entry_addenda_count
    }

    /// Sum of the entries' routing numbers, modulo 10^10
    pub fn entry_hash(&self) -> u64 {
        self.entry_hash
    }

    /// Total debit amount in cents
    pub fn total_debit(&self) -> u64 {
        self.total_debit
    }

    /// Total credit amount in cents
    pub fn total_credit(&self) -> u64 {
        self.total_credit
    }

    pub fn company_identification(&self) -> &str {
        &self.company_identification
    }

    pub fn odfi_identification(&self) -> u32 {
        self.odfi_identification
    }

    pub fn batch_number(&self) -> u32 {
        self.batch_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoutingNumber, TransactionCode};

    fn header() -> BatchHeader {
        BatchHeader::new(SecCode::Ppd, "Acme Corp", "1234567890", 12104288).with_batch_number(3)
    }

    fn entry(code: TransactionCode, routing: u32, amount: u64) -> EntryDetail {
        EntryDetail::new(code, RoutingNumber::new(routing).unwrap(), "123456789", amount)
    }

    #[test]
    fn test_empty_control_copies_header_fields() {
        let control = BatchControl::empty(&header());
        assert_eq!(control.sec_code(), SecCode::Ppd);
        assert_eq!(
            control.service_class_code(),
            ServiceClassCode::MixedDebitsAndCredits
        );
        assert_eq!(control.company_identification(), "1234567890");
        assert_eq!(control.odfi_identification(), 12104288);
        assert_eq!(control.batch_number(), 3);
        assert_eq!(control.entry_addenda_count(), 0);
        assert_eq!(control.entry_hash(), 0);
    }

    #[test]
    fn test_tabulate_splits_debits_and_credits() {
        let entries = vec![
            entry(TransactionCode::CheckingCredit, 121042882, 10000),
            entry(TransactionCode::SavingsDebit, 231380104, 2500),
            entry(TransactionCode::LoanDebit, 21000021, 100),
            entry(TransactionCode::CheckingPrenoteCredit, 121042882, 0),
        ];

        let control = BatchControl::tabulate(&header(), &entries).unwrap();
        assert_eq!(control.entry_addenda_count(), 4);
        assert_eq!(control.entry_hash(), 121042882 + 231380104 + 21000021 + 121042882);
        assert_eq!(control.total_credit(), 10000);
        assert_eq!(control.total_debit(), 2600);
    }

    #[test]
    fn test_tabulate_counts_every_addenda_type() {
        let mut with_return = entry(TransactionCode::CheckingReturnNocDebit, 121042882, 100);
        with_return.addenda99 = Some(crate::types::Addenda99::new("R01", "121042880000001"));
        let entries = vec![
            entry(TransactionCode::CheckingCredit, 121042882, 100)
                .with_addenda05("one")
                .with_addenda05("two"),
            with_return,
        ];

        let control = BatchControl::tabulate(&header(), &entries).unwrap();
        assert_eq!(control.entry_addenda_count(), 5);
    }

    #[test]
    fn test_tabulate_rejects_entry_addenda_count_overflow() {
        let mut wide = entry(TransactionCode::CheckingCredit, 121042882, 1);
        wide.addenda05 = vec![crate::types::Addenda05::new("Invoice"); 9999];

        let mut entries = vec![wide; 99];
        entries.push(entry(TransactionCode::CheckingCredit, 121042882, 1));
        assert_eq!(
            BatchControl::tabulate(&header(), &entries)
                .unwrap()
                .entry_addenda_count(),
            MAX_ENTRY_ADDENDA_COUNT - 9999 + 1
        );

        entries.last_mut().unwrap().addenda05 = vec![crate::types::Addenda05::new("Invoice"); 9999];
        assert_eq!(
            BatchControl::tabulate(&header(), &entries),
            Err(BatchError::ControlOverflow {
                field: "entry_addenda_count"
            })
        );
    }

    #[test]
    fn test_tabulate_rejects_total_overflow() {
        let entries: Vec<EntryDetail> = (0..101)
            .map(|_| entry(TransactionCode::CheckingDebit, 121042882, 9_999_999_999))
            .collect();

        assert_eq!(
            BatchControl::tabulate(&header(), &entries),
            Err(BatchError::ControlOverflow {
                field: "total_debit"
            })
        );
    }
}
