//! Loan terms and the raw CSV record they are parsed from.

use crate::decimal::Money;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Upper bound on tenure. Keeps `(1 + r)^n` inside the decimal range for
/// any realistic rate.
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// Validated, immutable loan parameters.
///
/// # Invariants
///
/// - `principal > 0`
/// - `annual_rate_percent >= 0`
/// - `1 <= tenure_months <= MAX_TENURE_MONTHS`
///
/// Fields are private so a `LoanTerms` can only come from [`LoanTerms::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_months: u32,
}

impl LoanTerms {
    /// Creates loan terms, rejecting values that break the invariants.
    ///
    /// ```
    /// use loan_engine::{LoanTerms, Money};
    /// use rust_decimal_macros::dec;
    ///
    /// let terms = LoanTerms::new(Money::new(dec!(10000)), dec!(12), 12).unwrap();
    /// assert_eq!(terms.tenure_months(), 12);
    ///
    /// assert!(LoanTerms::new(Money::new(dec!(10000)), dec!(12), 0).is_err());
    /// ```
    pub fn new(principal: Money, annual_rate_percent: Decimal, tenure_months: u32) -> Result<Self> {
        if !principal.is_positive() {
            return Err(EngineError::InvalidTerms {
                field: "principal",
                reason: format!("must be greater than 0, got {}", principal),
            });
        }
        if annual_rate_percent.is_sign_negative() && !annual_rate_percent.is_zero() {
            return Err(EngineError::InvalidTerms {
                field: "annual_rate_percent",
                reason: format!("must not be negative, got {}", annual_rate_percent),
            });
        }
        if tenure_months == 0 || tenure_months > MAX_TENURE_MONTHS {
            return Err(EngineError::InvalidTerms {
                field: "tenure_months",
                reason: format!(
                    "must be within [1, {}], got {}",
                    MAX_TENURE_MONTHS, tenure_months
                ),
            });
        }

        Ok(LoanTerms {
            principal,
            annual_rate_percent,
            tenure_months,
        })
    }

    /// Amount borrowed.
    pub fn principal(&self) -> Money {
        self.principal
    }

    /// Yearly interest rate in percent (`12.5` means 12.5%).
    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    /// Number of monthly installments.
    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }
}

/// Raw loan record as read from CSV.
///
/// Numeric fields are kept as strings or wide integers so that bad input
/// can be reported with a useful message instead of a generic serde error.
#[derive(Debug, Deserialize)]
pub struct LoanRecord {
    /// Loan identifier (u32)
    pub loan_id: u32,

    /// Principal amount
    pub principal: String,

    /// Annual interest rate in percent
    pub annual_rate: String,

    /// Tenure in months
    pub tenure: i64,

    /// Installments already paid, present when a foreclosure quote is wanted
    #[serde(default)]
    pub months_paid: Option<i64>,
}

/// A parsed loan ready for processing.
#[derive(Debug, Clone)]
pub struct LoanRequest {
    /// Loan identifier
    pub loan_id: u32,

    /// Validated terms
    pub terms: LoanTerms,

    /// Installments already paid, not yet range checked
    pub months_paid: Option<i64>,
}

impl LoanRecord {
    /// Parses the raw CSV record into validated loan terms.
    pub fn parse(&self, row: usize) -> Result<LoanRequest> {
        let principal = parse_decimal(&self.principal, "principal", row)?;
        let annual_rate = parse_decimal(&self.annual_rate, "annual_rate", row)?;
        let tenure = u32::try_from(self.tenure).map_err(|_| EngineError::InvalidTerms {
            field: "tenure_months",
            reason: format!(
                "must be within [1, {}], got {}",
                MAX_TENURE_MONTHS, self.tenure
            ),
        })?;

        let terms = LoanTerms::new(Money::new(principal), annual_rate, tenure)?;

        Ok(LoanRequest {
            loan_id: self.loan_id,
            terms,
            months_paid: self.months_paid,
        })
    }
}

fn parse_decimal(raw: &str, field: &str, row: usize) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidRecord {
            row,
            message: format!("missing {}", field),
        });
    }
    Decimal::from_str(trimmed).map_err(|e| EngineError::InvalidRecord {
        row,
        message: format!("invalid {} '{}': {}", field, trimmed, e),
    })
}
