//! Batch assembly and validation engine
//!
//! This module provides the `Batch` that ties one header, one control and an
//! ordered list of entries to the SEC policy the batch was declared with.
//!
//! The engine has two operations:
//! - `build` assigns trace numbers, recomputes the control wholesale and then
//!   validates. It is transactional: on failure the entries and control are
//!   left as they were before the call.
//! - `validate` is read-only and fail-fast. It checks the header SEC code
//!   against the declared SEC code, then each entry in order against the
//!   SEC policy, the service class code and the field rule library.

use crate::core::sequence::CountingSequence;
use crate::core::traits::TraceSequence;
use crate::rules::{policy_for, Field, Inclusion, SecPolicy};
use crate::types::entry::{MAX_ENTRY_AMOUNT, MAX_TRACE_SEQUENCE};
use crate::types::{
    BatchControl, BatchError, BatchHeader, EntryDetail, SecCode, ServiceClassCode, TraceNumber,
};
use std::fmt;

/// Lifecycle state of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No entries
    Empty,
    /// Entries added or changed since the last build
    Assembled,
    /// Sequenced and tabulated, validation pending
    Built,
    /// Built and validated; the control reflects the entries
    Validated,
    /// The last build failed
    Failed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Empty => "empty",
            BatchState::Assembled => "assembled",
            BatchState::Built => "built",
            BatchState::Validated => "validated",
            BatchState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One ACH batch
///
/// Created empty from a header, filled by the caller, finalized by `build`.
/// The header is fixed at creation; the control is only ever written by
/// `build`; every entry mutation goes through methods that move the state
/// back to `Assembled`, so a stale control can be detected with
/// [`Batch::built_control`].
#[derive(Debug, Clone)]
pub struct Batch {
    header: BatchHeader,
    control: BatchControl,
    entries: Vec<EntryDetail>,
    policy: &'static SecPolicy,
    state: BatchState,
}

impl Batch {
    /// Create an empty batch typed by the header's own SEC code
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` if a header field fails its shape check.
    pub fn new(header: BatchHeader) -> Result<Self, BatchError> {
        let declared = header.sec_code;
        Self::with_declared_sec_code(declared, header)
    }

    /// Create an empty batch of type `declared`
    ///
    /// The header may carry a different SEC code; `validate` reports the
    /// mismatch rather than silently adopting either code.
    pub fn with_declared_sec_code(
        declared: SecCode,
        header: BatchHeader,
    ) -> Result<Self, BatchError> {
        header.check()?;

        Ok(Batch {
            control: BatchControl::empty(&header),
            header,
            entries: Vec::new(),
            policy: policy_for(declared),
            state: BatchState::Empty,
        })
    }

    pub fn header(&self) -> &BatchHeader {
        &self.header
    }

    /// Control from the last successful build, or the zero control
    ///
    /// Use [`Batch::built_control`] when the control must match the entries.
    pub fn control(&self) -> &BatchControl {
        &self.control
    }

    pub fn entries(&self) -> &[EntryDetail] {
        &self.entries
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn policy(&self) -> &'static SecPolicy {
        self.policy
    }

    /// SEC code the batch was declared with
    pub fn declared_sec_code(&self) -> SecCode {
        self.policy.sec_code
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry
    pub fn add_entry(&mut self, entry: EntryDetail) {
        self.entries.push(entry);
        self.mark_modified();
    }

    /// Mutable access to one entry
    ///
    /// Invalidates the current control: the batch returns to `Assembled`.
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut EntryDetail> {
        if index >= self.entries.len() {
            return None;
        }
        self.mark_modified();
        self.entries.get_mut(index)
    }

    /// Remove and return the entry at `index`
    pub fn remove_entry(&mut self, index: usize) -> Option<EntryDetail> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.mark_modified();
        Some(entry)
    }

    fn mark_modified(&mut self) {
        self.state = if self.entries.is_empty() {
            BatchState::Empty
        } else {
            BatchState::Assembled
        };
    }

    /// Control that is guaranteed to reflect the current entries
    ///
    /// # Errors
    ///
    /// Returns `NotBuilt` unless the last build succeeded and no entry has
    /// been touched since.
    pub fn built_control(&self) -> Result<&BatchControl, BatchError> {
        match self.state {
            BatchState::Validated => Ok(&self.control),
            state => Err(BatchError::NotBuilt {
                state: state.to_string(),
            }),
        }
    }

    /// Informational structural check
    ///
    /// An empty batch still builds to a zero control; callers that expect
    /// entries can use this to surface the condition.
    pub fn verify(&self) -> Result<(), BatchError> {
        if self.entries.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        Ok(())
    }

    /// Build with trace sequence numbers starting at 1
    pub fn build(&mut self) -> Result<&BatchControl, BatchError> {
        self.build_with(&mut CountingSequence::new())
    }

    /// Sequence, tabulate and validate the batch
    ///
    /// Trace numbers are drawn from `sequence` one per entry, in entry
    /// order. The control is recomputed from scratch. Nothing is committed
    /// unless validation passes; on failure the batch keeps its previous
    /// entries and control and moves to `Failed`. The sequence source is
    /// advanced either way.
    ///
    /// # Errors
    ///
    /// - `InvalidSequence` / `SequenceNotMonotonic` for a bad sequence value
    /// - `ControlOverflow` when a control field exceeds its width
    /// - any error `validate` reports
    pub fn build_with(
        &mut self,
        sequence: &mut dyn TraceSequence,
    ) -> Result<&BatchControl, BatchError> {
        let (entries, control) = match self.sequence_and_tabulate(sequence) {
            Ok(built) => built,
            Err(e) => {
                self.state = BatchState::Failed;
                return Err(e);
            }
        };
        self.state = BatchState::Built;

        if let Err(e) = validate_entries(&self.header, self.policy, &entries) {
            self.state = BatchState::Failed;
            return Err(e);
        }

        self.entries = entries;
        self.control = control;
        self.state = BatchState::Validated;
        Ok(&self.control)
    }

    fn sequence_and_tabulate(
        &self,
        sequence: &mut dyn TraceSequence,
    ) -> Result<(Vec<EntryDetail>, BatchControl), BatchError> {
        let mut entries = self.entries.clone();
        let mut previous: Option<u32> = None;

        for (index, entry) in entries.iter_mut().enumerate() {
            let next = sequence.next_sequence();
            if next == 0 || next > MAX_TRACE_SEQUENCE {
                return Err(BatchError::InvalidSequence {
                    index,
                    sequence: next,
                });
            }
            if let Some(previous) = previous {
                if next <= previous {
                    return Err(BatchError::SequenceNotMonotonic {
                        index,
                        previous,
                        next,
                    });
                }
            }
            previous = Some(next);

            entry.assign_trace(TraceNumber::new(self.header.odfi_identification, next));
            if self.policy.records_addenda_count {
                entry.recorded_addenda_count = Some(entry.addenda05.len());
            }
        }

        let control = BatchControl::tabulate(&self.header, &entries)?;
        Ok((entries, control))
    }

    /// Check the batch against NACHA rules and its SEC policy
    ///
    /// Read-only and fail-fast: the first violation is returned. The control
    /// is not re-derived; run `build` first to have it match the entries.
    pub fn validate(&self) -> Result<(), BatchError> {
        validate_entries(&self.header, self.policy, &self.entries)
    }
}

fn validate_entries(
    header: &BatchHeader,
    policy: &SecPolicy,
    entries: &[EntryDetail],
) -> Result<(), BatchError> {
    if header.sec_code != policy.sec_code {
        return Err(BatchError::SecCodeMismatch {
            header: header.sec_code,
            declared: policy.sec_code,
        });
    }

    for (index, entry) in entries.iter().enumerate() {
        check_amount(index, entry)?;
        check_addenda_capacity(index, entry, policy)?;
        check_recorded_addenda_count(index, entry, policy)?;
        check_transaction_code(index, entry, policy)?;
        check_service_class(index, entry, header.service_class_code)?;
        check_field_inclusion(index, entry, policy)?;
    }

    Ok(())
}

fn check_amount(index: usize, entry: &EntryDetail) -> Result<(), BatchError> {
    if entry.amount > MAX_ENTRY_AMOUNT {
        return Err(BatchError::AmountOutOfRange {
            index,
            amount: entry.amount,
        });
    }
    Ok(())
}

fn check_addenda_capacity(
    index: usize,
    entry: &EntryDetail,
    policy: &SecPolicy,
) -> Result<(), BatchError> {
    if let Some(limit) = policy.addenda05_limit {
        if entry.addenda05.len() > limit {
            return Err(BatchError::addenda_count_exceeded(
                index,
                "Addenda05",
                entry.addenda05.len(),
                limit,
            ));
        }
    }

    if let Some(detail) = &entry.international {
        let optional_records = [
            ("Addenda17", detail.addenda17.len(), policy.addenda17_limit),
            ("Addenda18", detail.addenda18.len(), policy.addenda18_limit),
        ];
        for (addenda, count, limit) in optional_records {
            if let Some(limit) = limit {
                if count > limit {
                    return Err(BatchError::addenda_count_exceeded(
                        index, addenda, count, limit,
                    ));
                }
            }
        }
    }

    Ok(())
}

fn check_recorded_addenda_count(
    index: usize,
    entry: &EntryDetail,
    policy: &SecPolicy,
) -> Result<(), BatchError> {
    if !policy.records_addenda_count {
        return Ok(());
    }

    // A blank sub-field reads as zero.
    let recorded = entry.recorded_addenda_count.unwrap_or(0);
    if recorded != entry.addenda05.len() {
        return Err(BatchError::AddendaCountMismatch {
            index,
            recorded,
            actual: entry.addenda05.len(),
        });
    }
    Ok(())
}

fn check_transaction_code(
    index: usize,
    entry: &EntryDetail,
    policy: &SecPolicy,
) -> Result<(), BatchError> {
    if policy.forbids(entry.transaction_code) {
        return Err(BatchError::ForbiddenTransactionCode {
            index,
            code: entry.transaction_code,
            sec_code: policy.sec_code,
        });
    }
    Ok(())
}

fn check_service_class(
    index: usize,
    entry: &EntryDetail,
    service_class: ServiceClassCode,
) -> Result<(), BatchError> {
    if !service_class.permits(entry.transaction_code.direction()) {
        return Err(BatchError::ServiceClassMismatch {
            index,
            code: entry.transaction_code,
            service_class,
        });
    }
    Ok(())
}

fn check_field_inclusion(
    index: usize,
    entry: &EntryDetail,
    policy: &SecPolicy,
) -> Result<(), BatchError> {
    let category = entry.category();

    for field in Field::ALL {
        let present = field.is_present_on(entry);
        match policy.inclusion(field, category) {
            Inclusion::Required if !present => {
                return Err(BatchError::unexpectedly_blank(index, field.name()));
            }
            Inclusion::Blank if present => {
                return Err(BatchError::unexpectedly_present(index, field.name()));
            }
            _ => {}
        }
    }

    if let Some(detail) = &entry.international {
        if let Some(name) = detail.blank_required_field() {
            return Err(BatchError::unexpectedly_blank(index, name));
        }
    }

    Ok(())
}
