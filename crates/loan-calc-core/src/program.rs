//! Rate programs and the fixed annual rate bound to each.
//!
//! A request carries its program as three independent flags, the shape it has
//! on the wire. [`LoanProgram::selection`] folds those flags into a closed
//! [`ProgramSelection`] so that "exactly one program" is checked in one place,
//! and [`resolve_rate`] turns a valid selection into its annual rate.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::Rate;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Rate table
// ---------------------------------------------------------------------------

pub const BASE_ANNUAL_RATE: Rate = dec!(0.10);
pub const MILITARY_ANNUAL_RATE: Rate = dec!(0.09);
pub const SALARY_ANNUAL_RATE: Rate = dec!(0.08);

const CHOOSE_PROGRAM: &str = "choose program";
const CHOOSE_ONLY_ONE: &str = "choose only 1 program";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single, valid rate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Base,
    Military,
    Salary,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [ProgramKind::Base, ProgramKind::Military, ProgramKind::Salary];

    pub const fn annual_rate(self) -> Rate {
        match self {
            ProgramKind::Base => BASE_ANNUAL_RATE,
            ProgramKind::Military => MILITARY_ANNUAL_RATE,
            ProgramKind::Salary => SALARY_ANNUAL_RATE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProgramKind::Base => "base",
            ProgramKind::Military => "military",
            ProgramKind::Salary => "salary",
        }
    }
}

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramKind {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(ProgramKind::Base),
            "military" => Ok(ProgramKind::Military),
            "salary" => Ok(ProgramKind::Salary),
            other => Err(LoanCalcError::InvalidArgument(format!(
                "unknown program '{other}' (expected base, military or salary)"
            ))),
        }
    }
}

/// The program flags as submitted. Any combination is representable here;
/// validity is decided by [`LoanProgram::selection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanProgram {
    #[serde(default)]
    pub base: bool,
    #[serde(default)]
    pub military: bool,
    #[serde(default)]
    pub salary: bool,
}

/// Outcome of folding the three flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramSelection {
    None,
    Single(ProgramKind),
    Multiple,
}

impl LoanProgram {
    pub fn base() -> Self {
        ProgramKind::Base.into()
    }

    pub fn military() -> Self {
        ProgramKind::Military.into()
    }

    pub fn salary() -> Self {
        ProgramKind::Salary.into()
    }

    /// Raise the flag of every kind in `kinds`.
    pub fn from_kinds<I: IntoIterator<Item = ProgramKind>>(kinds: I) -> Self {
        let mut program = LoanProgram::default();
        for kind in kinds {
            match kind {
                ProgramKind::Base => program.base = true,
                ProgramKind::Military => program.military = true,
                ProgramKind::Salary => program.salary = true,
            }
        }
        program
    }

    pub fn selection(&self) -> ProgramSelection {
        let flags = [
            (self.base, ProgramKind::Base),
            (self.military, ProgramKind::Military),
            (self.salary, ProgramKind::Salary),
        ];
        let mut chosen = flags.iter().filter(|(set, _)| *set).map(|(_, kind)| *kind);
        match (chosen.next(), chosen.next()) {
            (None, _) => ProgramSelection::None,
            (Some(kind), None) => ProgramSelection::Single(kind),
            (Some(_), Some(_)) => ProgramSelection::Multiple,
        }
    }
}

impl From<ProgramKind> for LoanProgram {
    fn from(kind: ProgramKind) -> Self {
        LoanProgram::from_kinds([kind])
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve the annual rate for a requested program.
///
/// An absent program is treated the same as one with no flags raised.
pub fn resolve_rate(program: Option<&LoanProgram>) -> LoanCalcResult<Rate> {
    let selection = program.map_or(ProgramSelection::None, LoanProgram::selection);
    let rate = match selection {
        ProgramSelection::None => {
            return Err(LoanCalcError::InvalidArgument(CHOOSE_PROGRAM.into()));
        }
        ProgramSelection::Multiple => {
            return Err(LoanCalcError::InvalidArgument(CHOOSE_ONLY_ONE.into()));
        }
        ProgramSelection::Single(kind) => kind.annual_rate(),
    };
    tracing::debug!(?selection, %rate, "resolved annual rate");
    Ok(rate)
}
