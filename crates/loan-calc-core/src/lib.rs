pub mod annuity;
pub mod cache;
pub mod calculator;
pub mod error;
pub mod program;
pub mod types;

pub use cache::ResultCache;
pub use calculator::LoanCalculator;
pub use error::{ErrorKind, LoanCalcError};
pub use program::{LoanProgram, ProgramKind, ProgramSelection};
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
