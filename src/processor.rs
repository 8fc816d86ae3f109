//! Batch loan processing.
//!
//! Reads a book of loans from CSV, computes each loan's figures with the
//! amortization engine and writes summaries or full schedules back out as CSV.
//! Rows that cannot be turned into a valid loan are logged and skipped.

use crate::amortization;
use crate::error::{EngineError, Result};
use crate::limits::LendingLimits;
use crate::schedule::LoanSummary;
use crate::terms::{LoanRecord, LoanTerms};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{Read, Write};

const SUMMARY_HEADER: [&str; 9] = [
    "loan_id",
    "principal",
    "annual_rate",
    "tenure",
    "monthly_installment",
    "total_interest",
    "total_amount",
    "months_paid",
    "foreclosure_amount",
];

const SCHEDULE_HEADER: [&str; 6] = [
    "loan_id",
    "month",
    "installment",
    "principal_paid",
    "interest_paid",
    "remaining_balance",
];

/// An accepted loan and its precomputed summary.
#[derive(Debug, Clone)]
struct BookedLoan {
    terms: LoanTerms,
    summary: LoanSummary,
}

/// The loan book processor.
///
/// Holds every accepted loan keyed by loan ID, so output is always ordered
/// by ascending loan ID regardless of input order.
#[derive(Debug, Default)]
pub struct LoanProcessor {
    loans: BTreeMap<u32, BookedLoan>,

    /// When set, loans outside these limits are rejected.
    limits: Option<LendingLimits>,
}

impl LoanProcessor {
    /// Creates a new empty processor with no lending limits.
    pub fn new() -> Self {
        LoanProcessor {
            loans: BTreeMap::new(),
            limits: None,
        }
    }

    /// Rejects loans outside `limits` from now on.
    pub fn with_limits(mut self, limits: LendingLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Processes loans from a CSV reader in streaming fashion.
    ///
    /// Invalid rows are logged at warn level and skipped; only an unreadable
    /// header is fatal.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        // Fail fast on a missing or unreadable header.
        csv_reader.headers()?;

        for (row_idx, result) in csv_reader.deserialize::<LoanRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Err(e) = self.process_record(&record, row_num) {
                        warn!("Row {}: {}", row_num, e);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Validates a single record and books the loan.
    pub fn process_record(&mut self, record: &LoanRecord, row: usize) -> Result<()> {
        if self.loans.contains_key(&record.loan_id) {
            return Err(EngineError::DuplicateLoanId {
                loan_id: record.loan_id,
                row,
            });
        }

        let request = record.parse(row)?;
        if let Some(limits) = &self.limits {
            limits.check(&request.terms)?;
        }

        let summary = LoanSummary::build(request.loan_id, &request.terms, request.months_paid)?;
        debug!(
            "Row {}: Booked loan {} with installment {}",
            row, request.loan_id, summary.monthly_installment
        );

        self.loans.insert(
            request.loan_id,
            BookedLoan {
                terms: request.terms,
                summary,
            },
        );
        Ok(())
    }

    /// Returns the summary of a booked loan.
    pub fn get(&self, loan_id: u32) -> Option<&LoanSummary> {
        self.loans.get(&loan_id).map(|loan| &loan.summary)
    }

    /// Removes a loan from the book, returning its summary.
    pub fn remove(&mut self, loan_id: u32) -> Option<LoanSummary> {
        self.loans.remove(&loan_id).map(|loan| loan.summary)
    }

    /// Iterates over booked loan summaries in loan ID order.
    pub fn summaries(&self) -> impl Iterator<Item = &LoanSummary> {
        self.loans.values().map(|loan| &loan.summary)
    }

    /// Number of booked loans.
    pub fn len(&self) -> usize {
        self.loans.len()
    }

    /// Returns `true` if no loans are booked.
    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Writes one summary row per loan.
    ///
    /// `months_paid` and `foreclosure_amount` are left empty for loans that
    /// did not ask for a foreclosure quote.
    pub fn write_summary<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(SUMMARY_HEADER)?;
        for summary in self.summaries() {
            csv_writer.serialize(summary)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the full amortization schedule of every loan, one row per month.
    pub fn write_schedule<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(SCHEDULE_HEADER)?;
        for (loan_id, loan) in &self.loans {
            for entry in amortization::payment_schedule(&loan.terms)? {
                csv_writer.write_record([
                    loan_id.to_string(),
                    entry.month.to_string(),
                    entry.installment.to_string(),
                    entry.principal_paid.to_string(),
                    entry.interest_paid.to_string(),
                    entry.remaining_balance.to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
