//! # Loan Engine
//!
//! Loan financial math: equated monthly installment (EMI), total interest,
//! foreclosure amount and month-by-month amortization schedules, plus a
//! CSV batch processor for whole loan books.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Amounts are 2 decimal place `Money` values
//!   over `rust_decimal`, never binary floating point
//! - **Pure engine**: Every function in [`amortization`] is a stateless
//!   computation over validated [`LoanTerms`]
//! - **Closed schedules**: The final schedule entry always brings the balance
//!   to exactly zero
//! - **Deterministic output**: Loans are written sorted by loan ID
//!
//! ## Example
//!
//! ```
//! use loan_engine::{amortization, LoanTerms, Money};
//! use rust_decimal_macros::dec;
//!
//! let terms = LoanTerms::new(Money::new(dec!(10000)), dec!(12), 12).unwrap();
//! let schedule = amortization::payment_schedule(&terms).unwrap();
//!
//! assert_eq!(schedule.len(), 12);
//! assert_eq!(schedule[0].interest_paid.to_string(), "100.00");
//! assert_eq!(amortization::total_interest(&terms).unwrap().to_string(), "661.88");
//! ```

pub mod amortization;
pub mod decimal;
pub mod error;
pub mod limits;
pub mod processor;
pub mod schedule;
pub mod terms;

pub use amortization::{
    foreclosure_amount, monthly_installment, payment_schedule, total_amount, total_interest,
};
pub use decimal::Money;
pub use error::{EngineError, Result};
pub use limits::LendingLimits;
pub use processor::LoanProcessor;
pub use schedule::{LoanSummary, PaymentScheduleEntry};
pub use terms::{LoanRecord, LoanRequest, LoanTerms, MAX_TENURE_MONTHS};
