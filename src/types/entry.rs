//! Entry detail record and the identifiers it carries

use super::addenda::{Addenda02, Addenda05, Addenda98, Addenda99, InternationalDetail};
use super::codes::{Category, PaymentType, TransactionCode, TransactionKind};
use super::error::BatchError;
use std::fmt;
use std::str::FromStr;

/// Largest amount the 10-digit entry amount field can hold, in cents
pub const MAX_ENTRY_AMOUNT: u64 = 9_999_999_999;

/// Largest sequence number the 7-digit trace sequence can hold
pub const MAX_TRACE_SEQUENCE: u32 = 9_999_999;

/// Nine-digit ABA routing number of the receiving DFI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingNumber(u32);

impl RoutingNumber {
    /// Wrap a numeric routing number
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoutingNumber` if the value has more than nine digits.
    pub fn new(value: u32) -> Result<Self, BatchError> {
        if value > 999_999_999 {
            return Err(BatchError::InvalidRoutingNumber {
                value: value.to_string(),
            });
        }
        Ok(RoutingNumber(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The 8-digit RDFI identification (routing number without check digit)
    pub fn rdfi_identification(&self) -> u32 {
        self.0 / 10
    }

    pub fn check_digit(&self) -> u8 {
        (self.0 % 10) as u8
    }
}

impl FromStr for RoutingNumber {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 9 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BatchError::InvalidRoutingNumber {
                value: s.to_string(),
            });
        }
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| BatchError::InvalidRoutingNumber {
                value: s.to_string(),
            })?;
        RoutingNumber::new(value)
    }
}

impl fmt::Display for RoutingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}", self.0)
    }
}

/// Trace number: ODFI identification followed by a 7-digit sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TraceNumber {
    odfi_identification: u32,
    sequence: u32,
}

impl TraceNumber {
    pub(crate) fn new(odfi_identification: u32, sequence: u32) -> Self {
        TraceNumber {
            odfi_identification,
            sequence,
        }
    }

    pub fn odfi_identification(&self) -> u32 {
        self.odfi_identification
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The 15-digit numeric value
    pub fn value(&self) -> u64 {
        u64::from(self.odfi_identification) * 10_000_000 + u64::from(self.sequence)
    }
}

impl fmt::Display for TraceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:015}", self.value())
    }
}

/// One payment instruction within a batch
///
/// Callers set everything except the trace number, which `Batch::build`
/// assigns positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetail {
    /// Debit/credit, account type and prenote status of the entry
    pub transaction_code: TransactionCode,

    /// Receiving DFI routing number
    pub routing_number: RoutingNumber,

    /// Receiver's account number at the RDFI (17 characters max)
    pub account_number: String,

    /// Amount in cents
    pub amount: u64,

    /// Originator-assigned identification of the receiver
    pub identification_number: String,

    /// Receiver name; for CTX the receiving company name
    pub individual_name: String,

    pub discretionary_data: String,

    /// WEB payment type code
    pub payment_type: Option<PaymentType>,

    /// CTX "number of addenda records" sub-field
    ///
    /// Set by `Batch::build` for SEC codes that carry it. A blank value reads
    /// as zero during validation.
    pub recorded_addenda_count: Option<usize>,

    pub addenda02: Option<Addenda02>,
    pub addenda05: Vec<Addenda05>,
    pub addenda98: Option<Addenda98>,
    pub addenda99: Option<Addenda99>,

    /// IAT addenda block (Addenda10-18)
    pub international: Option<InternationalDetail>,

    trace_number: Option<TraceNumber>,
}

impl EntryDetail {
    /// Create an entry with no names, addenda or trace number
    pub fn new(
        transaction_code: TransactionCode,
        routing_number: RoutingNumber,
        account_number: &str,
        amount: u64,
    ) -> Self {
        EntryDetail {
            transaction_code,
            routing_number,
            account_number: account_number.to_string(),
            amount,
            identification_number: String::new(),
            individual_name: String::new(),
            discretionary_data: String::new(),
            payment_type: None,
            recorded_addenda_count: None,
            addenda02: None,
            addenda05: Vec::new(),
            addenda98: None,
            addenda99: None,
            international: None,
            trace_number: None,
        }
    }

    pub fn with_individual_name(mut self, name: &str) -> Self {
        self.individual_name = name.to_string();
        self
    }

    pub fn with_identification_number(mut self, identification: &str) -> Self {
        self.identification_number = identification.to_string();
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = Some(payment_type);
        self
    }

    pub fn with_addenda05(mut self, payment_related_information: &str) -> Self {
        self.addenda05
            .push(Addenda05::new(payment_related_information));
        self
    }

    pub fn with_international_detail(mut self, detail: InternationalDetail) -> Self {
        self.international = Some(detail);
        self
    }

    /// Trace number assigned by the last successful build
    pub fn trace_number(&self) -> Option<TraceNumber> {
        self.trace_number
    }

    /// Category derived from the transaction code and the attached addenda
    ///
    /// Live, prenote and zero-dollar codes are always `Forward`. Automated
    /// return/NOC codes are `Noc` when they carry only an Addenda98 and
    /// `Return` otherwise.
    pub fn category(&self) -> Category {
        match self.transaction_code.kind() {
            TransactionKind::ReturnOrNoc => {
                if self.addenda98.is_some() && self.addenda99.is_none() {
                    Category::Noc
                } else {
                    Category::Return
                }
            }
            _ => Category::Forward,
        }
    }

    /// Number of addenda records of every type attached to this entry
    pub fn addenda_record_count(&self) -> usize {
        usize::from(self.addenda02.is_some())
            + self.addenda05.len()
            + usize::from(self.addenda98.is_some())
            + usize::from(self.addenda99.is_some())
            + self
                .international
                .as_ref()
                .map_or(0, InternationalDetail::record_count)
    }

    /// Addenda record indicator: 1 when any addenda record is attached
    pub fn addenda_record_indicator(&self) -> u8 {
        u8::from(self.addenda_record_count() > 0)
    }

    /// Assign the trace number and propagate it to the attached addenda
    pub(crate) fn assign_trace(&mut self, trace: TraceNumber) {
        let entry_sequence = trace.sequence();
        for (position, addenda) in self.addenda05.iter_mut().enumerate() {
            // Saturates; an oversized list is rejected by validation afterwards.
            let sequence_number = u32::try_from(position + 1).unwrap_or(u32::MAX);
            addenda.assign_sequence(sequence_number, entry_sequence);
        }
        if let Some(addenda) = self.addenda98.as_mut() {
            addenda.trace_number = Some(trace);
        }
        if let Some(addenda) = self.addenda99.as_mut() {
            addenda.trace_number = Some(trace);
        }
        self.trace_number = Some(trace);
    }
}
