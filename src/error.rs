//! Error types for the loan engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Loan terms violate `principal > 0`, `rate >= 0` or `tenure >= 1`
    #[error("Invalid loan terms: {field} {reason}")]
    InvalidTerms { field: &'static str, reason: String },

    /// An argument is outside the range allowed for the given loan
    #[error("Invalid argument: {name} = {value} must be within [{min}, {max}]")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Decimal arithmetic overflowed while compounding
    #[error("Arithmetic overflow in {context}")]
    Overflow { context: &'static str },

    /// Loan terms fall outside the configured lending limits
    #[error("Outside lending limits: {field} {reason}")]
    OutsideLimits { field: &'static str, reason: String },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid loan record
    #[error("Invalid loan at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Duplicate loan ID
    #[error("Duplicate loan ID {loan_id} at row {row}")]
    DuplicateLoanId { loan_id: u32, row: usize },
}
