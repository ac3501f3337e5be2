use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::program::LoanProgram;

/// Currency amounts in minor units (kopecks, cents).
pub type Money = i64;

/// Annual rates expressed as decimals (0.08 = 8%). Never as percentages.
pub type Rate = Decimal;

/// Loan term in months.
pub type Months = i64;

/// What the borrower asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParams {
    pub object_cost: Money,
    pub initial_payment: Money,
    pub months: Months,
}

/// A single calculation request as it arrives from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub object_cost: Money,
    pub initial_payment: Money,
    pub months: Months,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<LoanProgram>,
}

impl LoanRequest {
    pub fn params(&self) -> LoanParams {
        LoanParams {
            object_cost: self.object_cost,
            initial_payment: self.initial_payment,
            months: self.months,
        }
    }
}

/// Totals derived from a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAggregates {
    pub rate: Rate,
    pub loan_sum: Money,
    pub monthly_payment: Money,
    pub overpayment: Money,
    /// Always the Unix epoch; no payment calendar is projected.
    pub last_payment_date: DateTime<Utc>,
}

/// One successful calculation, as returned to the caller and kept in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    pub params: LoanParams,
    pub program: LoanProgram,
    pub aggregates: LoanAggregates,
}

/// A snapshot of cached results, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheResult {
    pub results: Vec<LoanResult>,
}

impl CacheResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64_annuity_i64_minor_units".to_string(),
        },
    }
}
