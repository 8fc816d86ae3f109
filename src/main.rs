//! Loan Engine CLI
//!
//! Reads a CSV book of loans and writes either per-loan summaries or full
//! amortization schedules as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- loans.csv > summary.csv
//! cargo run -- --schedule loans.csv > schedule.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use loan_engine::{LendingLimits, LoanProcessor, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input loans CSV file
    input: PathBuf,

    /// Write the month-by-month amortization schedule instead of summaries
    #[arg(long)]
    schedule: bool,

    /// Reject loans outside the standard lending limits
    /// (principal 1,000 to 100,000, tenure 3 to 24 months)
    #[arg(long)]
    enforce_limits: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = File::open(&cli.input)?;
    let reader = BufReader::new(file);

    let mut processor = LoanProcessor::new();
    if cli.enforce_limits {
        processor = processor.with_limits(LendingLimits::default());
    }
    processor.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    if cli.schedule {
        processor.write_schedule(handle)?;
    } else {
        processor.write_summary(handle)?;
    }

    Ok(())
}
