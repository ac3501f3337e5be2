use loan_calc_core::annuity::{monthly_payment, round_non_negative};
use loan_calc_core::{
    ErrorKind, LoanCalcError, LoanCalculator, LoanProgram, LoanRequest, ProgramKind,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn salary_request() -> LoanRequest {
    // 4M object, exactly 20% down, 20 years on the salary program
    LoanRequest {
        object_cost: 4_000_000,
        initial_payment: 800_000,
        months: 240,
        program: Some(LoanProgram::salary()),
    }
}

// ===========================================================================
// Execute
// ===========================================================================

#[test]
fn test_execute_salary_scenario() {
    let calc = LoanCalculator::new();
    let result = calc.execute(&salary_request()).unwrap();

    assert_eq!(result.params.object_cost, 4_000_000);
    assert_eq!(result.params.initial_payment, 800_000);
    assert_eq!(result.params.months, 240);
    assert_eq!(result.program, LoanProgram::salary());

    let agg = &result.aggregates;
    assert_eq!(agg.rate, dec!(0.08));
    assert_eq!(agg.loan_sum, 3_200_000);
    // 3.2M * annuity factor(0.08/12, 240) = 26,766.08 -> rounded up
    assert_eq!(agg.monthly_payment, 26_767);
    assert_eq!(agg.overpayment, 3_224_080);

    assert_eq!(calc.result_cache().size(), 1);
}

#[test]
fn test_execute_all_programs_selected() {
    let calc = LoanCalculator::new();
    let mut req = salary_request();
    req.program = Some(LoanProgram {
        base: true,
        military: true,
        salary: true,
    });

    let err = calc.execute(&req).unwrap_err();
    assert_eq!(err, LoanCalcError::InvalidArgument("choose only 1 program".into()));
    assert_eq!(calc.result_cache().size(), 0);
}

#[test]
fn test_execute_without_program() {
    let calc = LoanCalculator::new();
    let mut req = salary_request();
    req.program = None;

    let err = calc.execute(&req).unwrap_err();
    assert_eq!(err, LoanCalcError::InvalidArgument("choose program".into()));
    assert_eq!(calc.result_cache().size(), 0);
}

#[test]
fn test_low_down_payment_never_reaches_cache() {
    let calc = LoanCalculator::new();
    for initial_payment in [0, 1, 500_000, 799_999] {
        let mut req = salary_request();
        req.initial_payment = initial_payment;
        let err = calc.execute(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "initial {initial_payment}");
    }
    assert_eq!(calc.cache().unwrap_err(), LoanCalcError::Empty);
}

#[test]
fn test_invalid_term_from_execute() {
    let calc = LoanCalculator::new();
    let mut req = salary_request();
    req.months = 0;
    let err = calc.execute(&req).unwrap_err();
    assert_eq!(err, LoanCalcError::InvalidTerm("zero months".into()));
    assert!(calc.result_cache().is_empty());
}

#[test]
fn test_overpayment_never_negative() {
    let calc = LoanCalculator::new();
    for kind in ProgramKind::ALL {
        for months in [1, 2, 12, 60, 120, 240, 360] {
            for object_cost in [1_000, 250_000, 4_000_000, 73_500_001] {
                let req = LoanRequest {
                    object_cost,
                    initial_payment: object_cost / 4,
                    months,
                    program: Some(kind.into()),
                };
                let result = calc.execute(&req).unwrap();
                let agg = &result.aggregates;
                assert!(agg.monthly_payment * months >= agg.loan_sum, "{req:?}");
                assert!(agg.overpayment >= 0, "{req:?}");
            }
        }
    }
}

#[test]
fn test_request_mutation_does_not_reach_cache() {
    let calc = LoanCalculator::new();
    let mut req = salary_request();
    let mut returned = calc.execute(&req).unwrap();

    req.object_cost = 1;
    req.program = Some(LoanProgram::base());
    returned.params.months = 1;
    returned.program.military = true;
    returned.aggregates.monthly_payment = 0;

    let cached = calc.cache().unwrap();
    assert_eq!(cached.results[0].params.object_cost, 4_000_000);
    assert_eq!(cached.results[0].params.months, 240);
    assert_eq!(cached.results[0].program, LoanProgram::salary());
    assert_eq!(cached.results[0].aggregates.monthly_payment, 26_767);
}

#[test]
fn test_cache_by_program_after_mixed_requests() {
    let calc = LoanCalculator::new();
    for kind in [ProgramKind::Base, ProgramKind::Salary, ProgramKind::Salary] {
        let mut req = salary_request();
        req.program = Some(kind.into());
        calc.execute(&req).unwrap();
    }
    assert_eq!(calc.cache_by_program(&LoanProgram::salary()).len(), 2);
    assert_eq!(calc.cache_by_program(&LoanProgram::base()).len(), 1);
    assert!(calc.cache_by_program(&LoanProgram::military()).is_empty());
    assert_eq!(calc.cache().unwrap().len(), 3);
}

#[test]
fn test_request_json_shape() {
    let req: LoanRequest = serde_json::from_str(
        r#"{"object_cost": 4000000, "initial_payment": 800000, "months": 240,
            "program": {"salary": true}}"#,
    )
    .unwrap();
    assert_eq!(req, salary_request());

    let result = LoanCalculator::new().execute(&req).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["aggregates"]["rate"], "0.08");
    assert_eq!(value["aggregates"]["monthly_payment"], 26_767);
    assert_eq!(value["aggregates"]["last_payment_date"], "1970-01-01T00:00:00Z");
}

// ===========================================================================
// Payment math
// ===========================================================================

#[test]
fn test_zero_rate_rejected_as_unsupported() {
    let err = monthly_payment(3_200_000, 0.0, 240).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedProgram);
}

#[test]
fn test_rounding_returns_smallest_integer_not_below() {
    for x in [0.0, 0.25, 1.0, 1.5, 26_766.082, 9.0e15] {
        let n = round_non_negative(x).unwrap();
        assert!(n as f64 >= x);
        assert!((n as f64) - x < 1.0);
    }
}

#[test]
fn test_rounding_failures_are_never_zero() {
    for x in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0e19] {
        assert!(round_non_negative(x).is_err(), "{x}");
    }
}
