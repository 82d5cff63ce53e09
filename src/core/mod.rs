//! Core batch engine module
//!
//! This module contains the batch engine components:
//! - `traits` - Trait abstraction for trace sequence sources
//! - `sequence` - Counting trace sequence
//! - `batch` - Batch lifecycle, build and validate

pub mod batch;
pub mod sequence;
pub mod traits;

pub use batch::{Batch, BatchState};
pub use sequence::CountingSequence;
pub use traits::TraceSequence;
