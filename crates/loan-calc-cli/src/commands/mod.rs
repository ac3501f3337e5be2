pub mod batch;
pub mod execute;

/// Shared methodology line for every command's output envelope.
pub const METHODOLOGY: &str =
    "Fixed-rate annuity, monthly compounding, payment rounded up to the minor unit";
