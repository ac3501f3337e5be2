//! Request validation, payment calculation and hand-off to the result cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::annuity::{meets_down_payment, monthly_payment};
use crate::cache::ResultCache;
use crate::error::LoanCalcError;
use crate::program::{resolve_rate, LoanProgram};
use crate::types::{CacheResult, LoanAggregates, LoanRequest, LoanResult};
use crate::LoanCalcResult;

/// The service-facing entry point: `Execute` and `Cache`.
///
/// Cloning is cheap and every clone writes to the same cache.
#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    cache: Arc<ResultCache>,
}

impl LoanCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<ResultCache>) -> Self {
        Self { cache }
    }

    pub fn result_cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Compute a schedule for `request` and record it on success. A failed
    /// request leaves the cache untouched.
    pub fn execute(&self, request: &LoanRequest) -> LoanCalcResult<LoanResult> {
        let result = match calculate(request) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "loan request rejected");
                return Err(e);
            }
        };
        tracing::info!(
            program = ?result.program,
            loan_sum = result.aggregates.loan_sum,
            monthly_payment = result.aggregates.monthly_payment,
            overpayment = result.aggregates.overpayment,
            "loan calculated"
        );
        self.cache.add(result.clone());
        Ok(result)
    }

    /// Every result calculated so far. Fails with [`LoanCalcError::Empty`]
    /// before the first successful `execute`.
    pub fn cache(&self) -> LoanCalcResult<CacheResult> {
        self.cache.get_all()
    }

    pub fn cache_by_program(&self, program: &LoanProgram) -> CacheResult {
        self.cache.get_by_program(program)
    }
}

/// Validate `request` and derive its aggregates without touching any cache.
pub fn calculate(request: &LoanRequest) -> LoanCalcResult<LoanResult> {
    if request.object_cost <= 0 {
        return Err(LoanCalcError::InvalidArgument(
            "object cost must be positive".into(),
        ));
    }
    if !meets_down_payment(request.object_cost, request.initial_payment) {
        return Err(LoanCalcError::InvalidArgument(
            "initial payment must be at least 20% of object cost".into(),
        ));
    }

    let rate = resolve_rate(request.program.as_ref())?;
    let annual_rate = rate
        .to_f64()
        .ok_or_else(|| LoanCalcError::InvalidRate(format!("rate {rate} is not representable")))?;

    let loan_sum = request
        .object_cost
        .checked_sub(request.initial_payment)
        .ok_or_else(|| LoanCalcError::Overflow("loan sum overflow".into()))?;

    let payment = monthly_payment(loan_sum, annual_rate, request.months)?;
    tracing::debug!(loan_sum, annual_rate, months = request.months, payment, "annuity payment");

    let total_payment = payment
        .checked_mul(request.months)
        .ok_or_else(|| LoanCalcError::Overflow("total payment overflow".into()))?;
    let overpayment = total_payment
        .checked_sub(loan_sum)
        .ok_or_else(|| LoanCalcError::Overflow("overpayment overflow".into()))?;

    Ok(LoanResult {
        params: request.params(),
        // resolve_rate has already rejected an absent program.
        program: request.program.unwrap_or_default(),
        aggregates: LoanAggregates {
            rate,
            loan_sum,
            monthly_payment: payment,
            overpayment,
            last_payment_date: DateTime::<Utc>::UNIX_EPOCH,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ProgramKind;
    use rust_decimal_macros::dec;

    fn request(object_cost: i64, initial_payment: i64, months: i64, kind: ProgramKind) -> LoanRequest {
        LoanRequest {
            object_cost,
            initial_payment,
            months,
            program: Some(kind.into()),
        }
    }

    #[test]
    fn test_salary_twenty_year_mortgage() {
        let result = calculate(&request(4_000_000, 800_000, 240, ProgramKind::Salary)).unwrap();
        let agg = &result.aggregates;
        assert_eq!(agg.rate, dec!(0.08));
        assert_eq!(agg.loan_sum, 3_200_000);
        assert_eq!(agg.monthly_payment, 26_767);
        assert_eq!(agg.overpayment, 26_767 * 240 - 3_200_000);
        assert_eq!(agg.last_payment_date, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(result.program, LoanProgram::salary());
    }

    #[test]
    fn test_rates_follow_program() {
        let base = calculate(&request(5_000_000, 1_000_000, 240, ProgramKind::Base)).unwrap();
        let military = calculate(&request(5_000_000, 1_000_000, 240, ProgramKind::Military)).unwrap();
        assert_eq!(base.aggregates.monthly_payment, 38_601);
        assert_eq!(military.aggregates.monthly_payment, 35_990);
    }

    #[test]
    fn test_down_payment_below_minimum() {
        let err = calculate(&request(4_000_000, 799_999, 240, ProgramKind::Salary)).unwrap_err();
        assert_eq!(
            err,
            LoanCalcError::InvalidArgument("initial payment must be at least 20% of object cost".into())
        );
    }

    #[test]
    fn test_zero_object_cost() {
        let err = calculate(&request(0, 0, 240, ProgramKind::Base)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_down_payment_checked_before_program() {
        let mut req = request(1_000_000, 0, 12, ProgramKind::Base);
        req.program = None;
        let err = calculate(&req).unwrap_err();
        assert_eq!(
            err,
            LoanCalcError::InvalidArgument("initial payment must be at least 20% of object cost".into())
        );
    }

    #[test]
    fn test_fully_paid_object_has_no_loan() {
        let err = calculate(&request(1_000_000, 1_000_000, 12, ProgramKind::Base)).unwrap_err();
        assert_eq!(err, LoanCalcError::InvalidAmount("zero loan sum".into()));
    }

    #[test]
    fn test_failed_execute_leaves_cache_alone() {
        let calc = LoanCalculator::new();
        let mut req = request(4_000_000, 800_000, 240, ProgramKind::Salary);
        req.program = Some(LoanProgram {
            base: true,
            military: true,
            salary: true,
        });
        let err = calc.execute(&req).unwrap_err();
        assert_eq!(err, LoanCalcError::InvalidArgument("choose only 1 program".into()));
        assert_eq!(calc.result_cache().size(), 0);
        assert_eq!(calc.cache().unwrap_err(), LoanCalcError::Empty);
    }

    #[test]
    fn test_execute_records_result() {
        let calc = LoanCalculator::new();
        let result = calc
            .execute(&request(4_000_000, 800_000, 240, ProgramKind::Salary))
            .unwrap();
        let cached = calc.cache().unwrap();
        assert_eq!(cached.results, vec![result]);
    }

    #[test]
    fn test_clones_share_cache() {
        let calc = LoanCalculator::new();
        let other = calc.clone();
        other
            .execute(&request(4_000_000, 800_000, 240, ProgramKind::Base))
            .unwrap();
        assert_eq!(calc.result_cache().size(), 1);
    }
}
