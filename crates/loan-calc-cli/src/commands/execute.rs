use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use serde_json::Value;

use loan_calc_core::{with_metadata, LoanCalculator, LoanProgram, LoanRequest, ProgramKind};

use super::METHODOLOGY;
use crate::input;

/// Arguments for a single loan calculation
#[derive(Args)]
pub struct ExecuteArgs {
    /// Path to a JSON LoanRequest file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Object cost in minor currency units
    #[arg(long)]
    pub object_cost: Option<i64>,

    /// Down payment in minor currency units
    #[arg(long)]
    pub initial_payment: Option<i64>,

    /// Loan term in months
    #[arg(long)]
    pub months: Option<i64>,

    /// Rate program: base, military or salary. Each occurrence raises one flag.
    #[arg(long = "program")]
    pub programs: Vec<ProgramKind>,
}

pub fn run_execute(args: ExecuteArgs, calculator: &LoanCalculator) -> Result<Value, Box<dyn Error>> {
    let request = build_request(&args)?;
    let start = Instant::now();
    let result = calculator.execute(&request)?;
    let elapsed_us = start.elapsed().as_micros() as u64;

    let output = with_metadata(METHODOLOGY, &request, Vec::new(), elapsed_us, result);
    Ok(serde_json::to_value(output)?)
}

/// File first, then flags, then piped stdin.
fn build_request(args: &ExecuteArgs) -> Result<LoanRequest, Box<dyn Error>> {
    if args.input.is_some() {
        if let Some(request) = input::read_input(args.input.as_deref())? {
            return Ok(request);
        }
    }

    if let (Some(object_cost), Some(initial_payment), Some(months)) =
        (args.object_cost, args.initial_payment, args.months)
    {
        let program = if args.programs.is_empty() {
            None
        } else {
            Some(LoanProgram::from_kinds(args.programs.iter().copied()))
        };
        return Ok(LoanRequest {
            object_cost,
            initial_payment,
            months,
            program,
        });
    }

    input::read_input(None)?.ok_or_else(|| {
        "--input <file.json>, stdin, or --object-cost/--initial-payment/--months required".into()
    })
}
