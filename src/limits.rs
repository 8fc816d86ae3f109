//! Lending limits applied to incoming loans.

use crate::decimal::Money;
use crate::error::{EngineError, Result};
use crate::terms::LoanTerms;
use rust_decimal_macros::dec;

/// Product bounds on principal and tenure, both inclusive.
///
/// The amortization functions never consult these; they only gate which
/// loans a [`LoanProcessor`](crate::LoanProcessor) accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendingLimits {
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
}

impl LendingLimits {
    /// Sets the allowed principal range.
    pub fn with_principal(mut self, min: Money, max: Money) -> Self {
        self.min_principal = min;
        self.max_principal = max;
        self
    }

    /// Sets the allowed tenure range in months.
    pub fn with_tenure(mut self, min: u32, max: u32) -> Self {
        self.min_tenure_months = min;
        self.max_tenure_months = max;
        self
    }

    /// Fails with `OutsideLimits` naming the first field out of range.
    pub fn check(&self, terms: &LoanTerms) -> Result<()> {
        let principal = terms.principal();
        if principal < self.min_principal || principal > self.max_principal {
            return Err(EngineError::OutsideLimits {
                field: "principal",
                reason: format!(
                    "{} not within [{}, {}]",
                    principal, self.min_principal, self.max_principal
                ),
            });
        }

        let tenure = terms.tenure_months();
        if tenure < self.min_tenure_months || tenure > self.max_tenure_months {
            return Err(EngineError::OutsideLimits {
                field: "tenure_months",
                reason: format!(
                    "{} not within [{}, {}]",
                    tenure, self.min_tenure_months, self.max_tenure_months
                ),
            });
        }

        Ok(())
    }
}

impl Default for LendingLimits {
    /// 1,000 to 100,000 over 3 to 24 months.
    fn default() -> Self {
        LendingLimits {
            min_principal: Money::new(dec!(1000)),
            max_principal: Money::new(dec!(100000)),
            min_tenure_months: 3,
            max_tenure_months: 24,
        }
    }
}
