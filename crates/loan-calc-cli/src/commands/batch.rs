use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use loan_calc_core::{
    with_metadata, LoanCalcResult, LoanCalculator, LoanProgram, LoanRequest, LoanResult,
    ProgramKind,
};

use super::METHODOLOGY;
use crate::input;

/// Arguments for a concurrent batch of calculations
#[derive(Args)]
pub struct BatchArgs {
    /// Path to a JSON array of LoanRequests
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Only list cached results for this program
    #[arg(long)]
    pub program: Option<ProgramKind>,

    /// Worker threads (overrides batch.workers from the config)
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    submitted: usize,
    succeeded: usize,
    failed: usize,
    results: Vec<LoanResult>,
}

pub fn run_batch(
    args: BatchArgs,
    calculator: &LoanCalculator,
    default_workers: usize,
) -> Result<Value, Box<dyn Error>> {
    let requests: Vec<LoanRequest> = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for batch")?;
    let workers = args.workers.unwrap_or(default_workers).max(1);

    let start = Instant::now();
    let outcomes = execute_all(calculator, &requests, workers)?;
    let elapsed_us = start.elapsed().as_micros() as u64;

    let warnings: Vec<String> = outcomes
        .iter()
        .enumerate()
        .filter_map(|(i, outcome)| {
            outcome
                .as_ref()
                .err()
                .map(|e| format!("request {i} rejected ({}): {e}", e.kind()))
        })
        .collect();
    let failed = warnings.len();

    let view = match args.program {
        Some(kind) => calculator.cache_by_program(&LoanProgram::from(kind)),
        None => calculator.cache()?,
    };

    let report = BatchReport {
        submitted: requests.len(),
        succeeded: requests.len() - failed,
        failed,
        results: view.results,
    };
    let assumptions = serde_json::json!({ "workers": workers, "program": args.program });
    let output = with_metadata(METHODOLOGY, &assumptions, warnings, elapsed_us, report);
    Ok(serde_json::to_value(output)?)
}

/// Run every request on `workers` scoped threads against the shared
/// calculator. Outcomes come back in request order.
fn execute_all(
    calculator: &LoanCalculator,
    requests: &[LoanRequest],
    workers: usize,
) -> Result<Vec<LoanCalcResult<LoanResult>>, Box<dyn Error>> {
    let workers = workers.min(requests.len()).max(1);
    tracing::debug!(requests = requests.len(), workers, "starting batch");

    let mut indexed = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                s.spawn(move || {
                    requests
                        .iter()
                        .enumerate()
                        .skip(worker)
                        .step_by(workers)
                        .map(|(i, request)| (i, calculator.execute(request)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut indexed = Vec::with_capacity(requests.len());
        for handle in handles {
            match handle.join() {
                Ok(part) => indexed.extend(part),
                Err(_) => return Err("batch worker panicked"),
            }
        }
        Ok(indexed)
    })?;

    indexed.sort_by_key(|(i, _)| *i);
    Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
}
