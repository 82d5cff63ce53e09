//! ACH batch CLI
//!
//! Builds one NACHA batch from a CSV file of entry rows and prints the batch
//! control (or the traced entries) as CSV on stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- entries.csv --sec-code CTX --company-name "Acme Corp" \
//!     --company-id 1234567890 --odfi 12104288 > control.csv
//! cargo run -- entries.csv --sec-code PPD --company-name "Acme Corp" \
//!     --company-id 1234567890 --odfi 12104288 --output entries > entries.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed row, batch failed validation, etc.)

use ach_batch_engine::cli;
use ach_batch_engine::pipeline::BatchPipeline;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();
    let pipeline = BatchPipeline::new(args.to_pipeline_config());

    let stdout = io::stdout();
    let mut output = stdout.lock();
    if let Err(e) = pipeline.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
