//! Core traits for the batch engine
//!
//! The engine never owns a process-wide counter: the source of trace sequence
//! numbers is passed into `Batch::build_with`, scoped to one batch, so tests
//! and file assemblers can supply deterministic sequences.

/// Source of entry sequence numbers for trace number assignment
///
/// `Batch::build_with` draws one value per entry, in entry order. Values must
/// lie in `1..=9_999_999` and strictly increase; the engine rejects anything
/// else with a `Sequence` error.
pub trait TraceSequence {
    /// Next sequence number for the next entry
    fn next_sequence(&mut self) -> u32;
}
