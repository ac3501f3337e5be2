//! Annuity payment math on IEEE doubles.
//!
//! Amounts enter and leave as integer minor units; only the annuity factor is
//! computed in `f64`. Every step that can leave the finite, non-negative range
//! of `i64` is checked and reported as a distinct error.

use crate::error::LoanCalcError;
use crate::types::{Money, Months};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Smallest accepted `initial_payment / object_cost`.
pub const MIN_DOWN_PAYMENT_RATIO: f64 = 0.20;

/// Fixed monthly payment that amortises `loan_sum` over `months` at
/// `annual_rate`, rounded up to the next minor unit.
pub fn monthly_payment(loan_sum: Money, annual_rate: f64, months: Months) -> LoanCalcResult<Money> {
    if loan_sum <= 0 {
        return Err(LoanCalcError::InvalidAmount("zero loan sum".into()));
    }
    if months <= 0 {
        return Err(LoanCalcError::InvalidTerm("zero months".into()));
    }
    if loan_sum == Money::MAX || months == Months::MAX {
        return Err(LoanCalcError::Overflow("loan sum or months overflow".into()));
    }
    if annual_rate < 0.0 {
        return Err(LoanCalcError::InvalidRate("rate less than 0.00".into()));
    }
    if annual_rate == 0.0 {
        return Err(LoanCalcError::UnsupportedProgram(
            "installment plan is not supported".into(),
        ));
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let growth = (1.0 + monthly_rate).powf(months as f64);
    let denominator = growth - 1.0;
    // A rate small enough to vanish against 1.0 leaves nothing to divide by.
    if denominator <= 0.0 {
        return Err(LoanCalcError::DegenerateDenominator(
            "denominator less than 0".into(),
        ));
    }

    let payment = loan_sum as f64 * (monthly_rate * growth) / denominator;
    round_non_negative(payment)
}

/// Ceiling of a non-negative finite value as `i64`.
///
/// The borrower never pays less than the exact annuity amount, so this always
/// rounds up.
pub fn round_non_negative(x: f64) -> LoanCalcResult<Money> {
    if x.is_nan() {
        return Err(LoanCalcError::NotANumber("NaN".into()));
    }
    if x.is_infinite() {
        return Err(LoanCalcError::Overflow("round num overflow".into()));
    }
    if x < 0.0 {
        return Err(LoanCalcError::Negative("num is negative".into()));
    }
    // i64::MAX is not representable; as f64 it rounds up to 2^63.
    if x >= Money::MAX as f64 {
        return Err(LoanCalcError::Overflow("round num overflow".into()));
    }
    Ok(x.ceil() as Money)
}

/// True when the down payment covers at least [`MIN_DOWN_PAYMENT_RATIO`] of
/// the object cost. `object_cost` must already be known to be positive.
pub fn meets_down_payment(object_cost: Money, initial_payment: Money) -> bool {
    initial_payment as f64 / object_cost as f64 >= MIN_DOWN_PAYMENT_RATIO
}
