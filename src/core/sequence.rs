//! Trace sequence implementations

use crate::core::traits::TraceSequence;

/// Counting sequence: `start`, `start + 1`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingSequence {
    next: u32,
}

impl CountingSequence {
    /// Sequence starting at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Sequence starting at `start`
    ///
    /// File assemblers use this to keep trace numbers unique across the
    /// batches of one file.
    pub fn starting_at(start: u32) -> Self {
        CountingSequence { next: start }
    }

    /// Value the next call will return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for CountingSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSequence for CountingSequence {
    fn next_sequence(&mut self) -> u32 {
        let current = self.next;
        self.next = self.next.saturating_add(1);
        current
    }
}
