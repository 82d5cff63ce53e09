use crate::pipeline::{OutputFormat, PipelineConfig};
use crate::types::header::parse_effective_date;
use crate::types::{BatchHeader, SecCode, ServiceClassCode};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Assemble and validate a NACHA ACH batch from CSV entry rows
#[derive(Parser, Debug)]
#[command(name = "ach-batch")]
#[command(about = "Assemble and validate a NACHA ACH batch from CSV entry rows", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing entry rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    #[arg(
        long = "sec-code",
        value_name = "SEC",
        help = "Standard Entry Class code: PPD, CCD, CTX, WEB or IAT"
    )]
    pub sec_code: SecCode,

    #[arg(long = "company-name", value_name = "NAME", help = "Originator name")]
    pub company_name: String,

    #[arg(
        long = "company-id",
        value_name = "ID",
        help = "Originator identification, usually a tax ID prefixed with 1"
    )]
    pub company_id: String,

    #[arg(
        long = "odfi",
        value_name = "ODFI",
        help = "8-digit originating DFI identification (trace number prefix)"
    )]
    pub odfi: u32,

    #[arg(
        long = "service-class",
        value_name = "CLASS",
        default_value = "mixed",
        help = "Service class: 'mixed' (200), 'credits' (220) or 'debits' (225)"
    )]
    pub service_class: ServiceClassArg,

    #[arg(
        long = "entry-description",
        value_name = "TEXT",
        default_value = "PAYMENT",
        help = "Company entry description shown to receivers"
    )]
    pub entry_description: String,

    #[arg(
        long = "effective-date",
        value_name = "YYMMDD",
        value_parser = parse_effective_date,
        help = "Effective entry date (default: today)"
    )]
    pub effective_date: Option<NaiveDate>,

    #[arg(
        long = "batch-number",
        value_name = "N",
        default_value_t = 1,
        help = "Batch number within the file"
    )]
    pub batch_number: u32,

    #[arg(
        long = "start-sequence",
        value_name = "N",
        default_value_t = 1,
        help = "First trace sequence number"
    )]
    pub start_sequence: u32,

    #[arg(
        long = "output",
        value_name = "FORMAT",
        default_value = "control",
        help = "Output: 'control' for the batch control row or 'entries' for traced entries"
    )]
    pub output: OutputFormat,
}

/// Service class choices accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ServiceClassArg {
    Mixed,
    Credits,
    Debits,
}

impl From<ServiceClassArg> for ServiceClassCode {
    fn from(arg: ServiceClassArg) -> Self {
        match arg {
            ServiceClassArg::Mixed => ServiceClassCode::MixedDebitsAndCredits,
            ServiceClassArg::Credits => ServiceClassCode::CreditsOnly,
            ServiceClassArg::Debits => ServiceClassCode::DebitsOnly,
        }
    }
}

impl CliArgs {
    /// Batch header described by the arguments
    pub fn to_header(&self) -> BatchHeader {
        let header = BatchHeader::new(
            self.sec_code,
            &self.company_name,
            &self.company_id,
            self.odfi,
        )
        .with_service_class(self.service_class.into())
        .with_entry_description(&self.entry_description)
        .with_batch_number(self.batch_number);

        match self.effective_date {
            Some(date) => header.with_effective_entry_date(date),
            None => header,
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.to_header())
            .with_start_sequence(self.start_sequence)
            .with_output(self.output)
    }
}
