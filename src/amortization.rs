//! Amortization engine.
//!
//! Pure functions over [`LoanTerms`] built on the annuity formula
//! `EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate
//! as a fraction. Nothing here holds state or performs I/O, so every
//! function is safe to call from any thread.
//!
//! All intermediate values are full-precision decimals; only the returned
//! amounts are rounded to 2 places.

use crate::decimal::Money;
use crate::error::{EngineError, Result};
use crate::schedule::PaymentScheduleEntry;
use crate::terms::LoanTerms;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Monthly interest rate as a fraction: `annual_rate_percent / 12 / 100`.
pub fn monthly_rate(terms: &LoanTerms) -> Decimal {
    terms.annual_rate_percent() / MONTHS_PER_YEAR / PERCENT
}

/// `(1 + rate)^periods`, failing on decimal overflow.
pub fn compound_factor(rate: Decimal, periods: u32) -> Result<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or(EngineError::Overflow {
            context: "compound factor",
        })
}

/// Rate and full-tenure growth of an interest-bearing loan.
struct Compounding {
    rate: Decimal,
    growth: Decimal,
}

impl Compounding {
    /// Returns `None` when the loan accrues no interest, either because the
    /// rate is zero or because it is too small to move `(1 + r)^n` at
    /// decimal precision.
    fn for_terms(terms: &LoanTerms) -> Result<Option<Self>> {
        let rate = monthly_rate(terms);
        if rate.is_zero() {
            return Ok(None);
        }

        let growth = compound_factor(rate, terms.tenure_months())?;
        if growth == Decimal::ONE {
            return Ok(None);
        }

        Ok(Some(Compounding { rate, growth }))
    }
}

fn checked(value: Option<Decimal>, context: &'static str) -> Result<Decimal> {
    value.ok_or(EngineError::Overflow { context })
}

/// Fixed monthly payment (EMI), rounded to 2 decimal places.
///
/// ```
/// use loan_engine::{amortization, LoanTerms, Money};
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(Money::new(dec!(10000)), dec!(12), 12).unwrap();
/// assert_eq!(amortization::monthly_installment(&terms).unwrap().to_string(), "888.49");
/// ```
pub fn monthly_installment(terms: &LoanTerms) -> Result<Money> {
    let principal = terms.principal().as_decimal();

    let exact = match Compounding::for_terms(terms)? {
        None => principal / Decimal::from(terms.tenure_months()),
        Some(Compounding { rate, growth }) => {
            let numerator = checked(rate.checked_mul(growth), "installment")?;
            let factor = checked(numerator.checked_div(growth - Decimal::ONE), "installment")?;
            checked(principal.checked_mul(factor), "installment")?
        }
    };

    let installment = Money::new(exact);
    // Tiny principals over long tenures can round down to nothing.
    if !installment.is_positive() {
        return Ok(Money::new(dec!(0.01)));
    }
    Ok(installment)
}

/// Interest paid over the life of the loan: `EMI * n - principal`.
///
/// An interest-free loan reports exactly zero even when the rounded
/// installment does not divide the principal evenly. Otherwise a rounded-down
/// installment can leave `EMI * n` a few cents short of the principal, and
/// the result is floored at zero.
pub fn total_interest(terms: &LoanTerms) -> Result<Money> {
    if Compounding::for_terms(terms)?.is_none() {
        return Ok(Money::ZERO);
    }

    let installment = monthly_installment(terms)?.as_decimal();
    let paid = checked(
        installment.checked_mul(Decimal::from(terms.tenure_months())),
        "total interest",
    )?;
    let interest = checked(
        paid.checked_sub(terms.principal().as_decimal()),
        "total interest",
    )?;
    Ok(Money::new(interest).max(Money::ZERO))
}

/// Principal plus total interest.
pub fn total_amount(terms: &LoanTerms) -> Result<Money> {
    let interest = total_interest(terms)?.as_decimal();
    let total = checked(
        terms.principal().as_decimal().checked_add(interest),
        "total amount",
    )?;
    Ok(Money::new(total))
}

/// Checks `0 <= months_paid <= tenure_months` and returns it as a month count.
pub fn check_months_paid(terms: &LoanTerms, months_paid: i64) -> Result<u32> {
    let tenure = terms.tenure_months();
    u32::try_from(months_paid)
        .ok()
        .filter(|m| *m <= tenure)
        .ok_or(EngineError::InvalidArgument {
            name: "months_paid",
            value: months_paid,
            min: 0,
            max: i64::from(tenure),
        })
}

/// Outstanding principal after `months_paid` installments, i.e. the amount
/// needed to close the loan early.
///
/// Computed as the present value of the remaining annuity:
/// `P * ((1 + r)^n - (1 + r)^m) / ((1 + r)^n - 1)`.
///
/// # Errors
///
/// `InvalidArgument` unless `0 <= months_paid <= tenure_months`.
pub fn foreclosure_amount(terms: &LoanTerms, months_paid: i64) -> Result<Money> {
    let months = check_months_paid(terms, months_paid)?;
    remaining_principal(terms, months)
}

/// Foreclosure amount for a month count already checked against the tenure.
pub(crate) fn remaining_principal(terms: &LoanTerms, months: u32) -> Result<Money> {
    let principal = terms.principal().as_decimal();
    let tenure = Decimal::from(terms.tenure_months());

    let remaining = match Compounding::for_terms(terms)? {
        None => {
            let scaled = checked(
                principal.checked_mul(tenure - Decimal::from(months)),
                "foreclosure amount",
            )?;
            checked(scaled.checked_div(tenure), "foreclosure amount")?
        }
        Some(Compounding { rate, growth }) => {
            let paid_growth = compound_factor(rate, months)?;
            let fraction = checked(
                (growth - paid_growth).checked_div(growth - Decimal::ONE),
                "foreclosure amount",
            )?;
            checked(principal.checked_mul(fraction), "foreclosure amount")?
        }
    };

    Ok(Money::new(remaining).max(Money::ZERO))
}

/// Month-by-month amortization schedule with exactly `tenure_months` entries.
///
/// Each month charges interest on the balance carried in from the previous
/// month and applies the rest of the installment to principal, rounding
/// every figure to 2 places. Because the installment itself is rounded, the
/// balance would otherwise drift a few cents away from zero by the end of
/// the tenure; the final entry absorbs that difference into
/// `principal_paid` so the balance closes at exactly zero and the principal
/// column sums to the amount borrowed.
pub fn payment_schedule(terms: &LoanTerms) -> Result<Vec<PaymentScheduleEntry>> {
    let installment = monthly_installment(terms)?;
    let rate = monthly_rate(terms);
    let tenure = terms.tenure_months();

    let mut balance = terms.principal();
    let mut schedule = Vec::with_capacity(tenure as usize);

    for month in 1..=tenure {
        let interest = checked(balance.as_decimal().checked_mul(rate), "schedule interest")?;
        let interest_paid = Money::new(interest);

        let principal_paid = if month == tenure {
            balance
        } else {
            (installment - interest_paid).max(Money::ZERO).min(balance)
        };

        balance = (balance - principal_paid).max(Money::ZERO);

        schedule.push(PaymentScheduleEntry {
            month,
            installment,
            principal_paid,
            interest_paid,
            remaining_balance: balance,
        });
    }

    Ok(schedule)
}
