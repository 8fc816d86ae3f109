//! Derived value objects: schedule entries and per-loan summaries.

use crate::amortization;
use crate::decimal::Money;
use crate::error::Result;
use crate::terms::LoanTerms;
use rust_decimal::Decimal;
use serde::Serialize;

/// One month of an amortization schedule.
///
/// # Invariants
///
/// - `installment` is the same for every entry of a schedule
/// - `principal_paid + interest_paid == installment`, except on the final
///   entry which absorbs the accumulated rounding difference
/// - `remaining_balance` never increases from one entry to the next, is
///   never negative, and is exactly zero on the final entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentScheduleEntry {
    /// 1-based month number.
    pub month: u32,

    /// Flat monthly installment (EMI).
    pub installment: Money,

    /// Portion of the installment that repays principal.
    pub principal_paid: Money,

    /// Portion of the installment that pays interest.
    pub interest_paid: Money,

    /// Principal still owed after this month's payment.
    pub remaining_balance: Money,
}

/// Headline figures for one loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanSummary {
    pub loan_id: u32,

    pub principal: Money,

    #[serde(rename = "annual_rate")]
    pub annual_rate_percent: Decimal,

    #[serde(rename = "tenure")]
    pub tenure_months: u32,

    pub monthly_installment: Money,

    pub total_interest: Money,

    pub total_amount: Money,

    /// Installments already paid, when a foreclosure quote was requested.
    pub months_paid: Option<u32>,

    /// Payoff amount after `months_paid` installments.
    pub foreclosure_amount: Option<Money>,
}

impl LoanSummary {
    /// Computes the summary for `terms`, including a foreclosure quote when
    /// `months_paid` is given.
    pub fn build(loan_id: u32, terms: &LoanTerms, months_paid: Option<i64>) -> Result<Self> {
        let (months_paid, foreclosure_amount) = match months_paid {
            Some(m) => {
                let months = amortization::check_months_paid(terms, m)?;
                let amount = amortization::remaining_principal(terms, months)?;
                (Some(months), Some(amount))
            }
            None => (None, None),
        };

        Ok(LoanSummary {
            loan_id,
            principal: terms.principal(),
            annual_rate_percent: terms.annual_rate_percent(),
            tenure_months: terms.tenure_months(),
            monthly_installment: amortization::monthly_installment(terms)?,
            total_interest: amortization::total_interest(terms)?,
            total_amount: amortization::total_amount(terms)?,
            months_paid,
            foreclosure_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rust_decimal_macros::dec;

    fn terms() -> LoanTerms {
        LoanTerms::new(Money::new(dec!(10000)), dec!(12), 12).unwrap()
    }

    #[test]
    fn test_summary_without_foreclosure() {
        let summary = LoanSummary::build(7, &terms(), None).unwrap();

        assert_eq!(summary.loan_id, 7);
        assert_eq!(summary.monthly_installment.to_string(), "888.49");
        assert_eq!(summary.total_interest.to_string(), "661.88");
        assert_eq!(summary.total_amount.to_string(), "10661.88");
        assert_eq!(summary.months_paid, None);
        assert_eq!(summary.foreclosure_amount, None);
    }

    #[test]
    fn test_summary_with_foreclosure() {
        let summary = LoanSummary::build(7, &terms(), Some(12)).unwrap();

        assert_eq!(summary.months_paid, Some(12));
        assert_eq!(summary.foreclosure_amount, Some(Money::ZERO));
    }

    #[test]
    fn test_summary_foreclosure_matches_engine() {
        let summary = LoanSummary::build(7, &terms(), Some(6)).unwrap();

        assert_eq!(summary.months_paid, Some(6));
        assert_eq!(
            summary.foreclosure_amount,
            Some(amortization::foreclosure_amount(&terms(), 6).unwrap())
        );
    }

    #[test]
    fn test_summary_rejects_months_paid_out_of_range() {
        for months_paid in [-1, 13] {
            let err = LoanSummary::build(7, &terms(), Some(months_paid)).unwrap_err();
            assert!(matches!(err, EngineError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_summary_reports_overflow() {
        let huge = LoanTerms::new(Money::new(dec!(50000000000000000000000000000)), dec!(1200), 2)
            .unwrap();

        let err = LoanSummary::build(1, &huge, None).unwrap_err();
        assert!(matches!(err, EngineError::Overflow { .. }));
    }
}
