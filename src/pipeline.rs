//! Batch pipeline
//!
//! Orchestrates one run of the binary: stream entry rows from a CSV file,
//! assemble them into a batch under the configured header, build it, and
//! write the requested view of the result.
//!
//! The pipeline delegates:
//! - CSV parsing to `EntryReader` (iterator interface)
//! - Sequencing, tabulation and validation to `Batch`
//! - CSV output to `csv_format::write_control_csv` / `write_entries_csv`
//!
//! Unlike the batch engine, the pipeline logs: `debug` per entry read, `info`
//! for the build summary and `error` on failure.

use crate::core::{Batch, CountingSequence};
use crate::io::csv_format::{format_amount, write_control_csv, write_entries_csv};
use crate::io::EntryReader;
use crate::types::{BatchControl, BatchError, BatchHeader};
use clap::ValueEnum;
use log::{debug, error, info};
use std::io::Write;
use std::path::Path;

/// Which view of the built batch to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One row with the batch control totals
    #[default]
    Control,
    /// One row per sequenced entry
    Entries,
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub header: BatchHeader,

    /// First trace sequence number handed out
    pub start_sequence: u32,

    pub output: OutputFormat,
}

impl PipelineConfig {
    pub fn new(header: BatchHeader) -> Self {
        PipelineConfig {
            header,
            start_sequence: 1,
            output: OutputFormat::default(),
        }
    }

    pub fn with_start_sequence(mut self, start_sequence: u32) -> Self {
        self.start_sequence = start_sequence;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}

/// Single-batch CSV pipeline
#[derive(Debug, Clone)]
pub struct BatchPipeline {
    config: PipelineConfig,
}

impl BatchPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        BatchPipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read entries from `input_path`, build the batch and write the result
    ///
    /// Any malformed row aborts the run before the batch is built. Nothing is
    /// written to `output` unless the build succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first input, build or output error encountered.
    pub fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<BatchControl, BatchError> {
        self.run(input_path, output).inspect_err(|e| {
            error!("Batch from '{}' failed: {}", input_path.display(), e);
        })
    }

    fn run(&self, input_path: &Path, output: &mut dyn Write) -> Result<BatchControl, BatchError> {
        let batch = self.assemble(input_path)?;
        let batch = self.build(batch)?;

        match self.config.output {
            OutputFormat::Control => write_control_csv(batch.control(), output)?,
            OutputFormat::Entries => write_entries_csv(batch.entries(), output)?,
        }

        Ok(batch.control().clone())
    }

    /// Read every row of `input_path` into a new batch
    pub fn assemble(&self, input_path: &Path) -> Result<Batch, BatchError> {
        let mut batch = Batch::new(self.config.header.clone())?;
        let reader = EntryReader::new(input_path)?;

        for result in reader {
            let entry = result?;
            debug!(
                "Entry {}: code {} to {} for {}",
                batch.len(),
                entry.transaction_code.code(),
                entry.routing_number,
                format_amount(entry.amount)
            );
            batch.add_entry(entry);
        }

        if batch.verify().is_err() {
            info!("No entries in '{}'; building an empty batch", input_path.display());
        }

        Ok(batch)
    }

    fn build(&self, mut batch: Batch) -> Result<Batch, BatchError> {
        let mut sequence = CountingSequence::starting_at(self.config.start_sequence);
        let entries = batch.len();
        let control = batch.build_with(&mut sequence)?;

        info!(
            "Built {} batch {}: {} entries, entry/addenda count {}, hash {}, debits {}, credits {}",
            control.sec_code(),
            control.batch_number(),
            entries,
            control.entry_addenda_count(),
            control.entry_hash(),
            format_amount(control.total_debit()),
            format_amount(control.total_credit())
        );

        Ok(batch)
    }
}
