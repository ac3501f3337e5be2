use thiserror::Error;

/// Every way a loan calculation or cache query can fail.
///
/// The `Display` output is the bare message so that a transport layer can
/// forward it to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanCalcError {
    /// Missing or ambiguous program, or a down payment below the minimum ratio.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidTerm(String),

    #[error("{0}")]
    InvalidRate(String),

    /// A zero annual rate. Interest-free installment plans are not offered.
    #[error("{0}")]
    UnsupportedProgram(String),

    /// `(1 + r)^n - 1` collapsed to zero or below.
    #[error("{0}")]
    DegenerateDenominator(String),

    #[error("{0}")]
    Negative(String),

    #[error("{0}")]
    NotANumber(String),

    #[error("{0}")]
    Overflow(String),

    #[error("cache is empty")]
    Empty,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Fieldless view of [`LoanCalcError`] for mapping onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidAmount,
    InvalidTerm,
    InvalidRate,
    UnsupportedProgram,
    DegenerateDenominator,
    Negative,
    NotANumber,
    Overflow,
    Empty,
    Config,
    Serialization,
}

impl ErrorKind {
    /// True when the caller sent something we refuse to compute, as opposed
    /// to a numeric fault inside the computation.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidArgument
                | ErrorKind::InvalidAmount
                | ErrorKind::InvalidTerm
                | ErrorKind::InvalidRate
                | ErrorKind::UnsupportedProgram
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::InvalidTerm => "invalid_term",
            ErrorKind::InvalidRate => "invalid_rate",
            ErrorKind::UnsupportedProgram => "unsupported_program",
            ErrorKind::DegenerateDenominator => "degenerate_denominator",
            ErrorKind::Negative => "negative",
            ErrorKind::NotANumber => "nan",
            ErrorKind::Overflow => "overflow",
            ErrorKind::Empty => "empty",
            ErrorKind::Config => "config",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LoanCalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoanCalcError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LoanCalcError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            LoanCalcError::InvalidTerm(_) => ErrorKind::InvalidTerm,
            LoanCalcError::InvalidRate(_) => ErrorKind::InvalidRate,
            LoanCalcError::UnsupportedProgram(_) => ErrorKind::UnsupportedProgram,
            LoanCalcError::DegenerateDenominator(_) => ErrorKind::DegenerateDenominator,
            LoanCalcError::Negative(_) => ErrorKind::Negative,
            LoanCalcError::NotANumber(_) => ErrorKind::NotANumber,
            LoanCalcError::Overflow(_) => ErrorKind::Overflow,
            LoanCalcError::Empty => ErrorKind::Empty,
            LoanCalcError::Config(_) => ErrorKind::Config,
            LoanCalcError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::Serialization(e.to_string())
    }
}
