//! Append-only, in-process log of successful calculations.
//!
//! Writers (`add`, `clear`) take the lock exclusively; readers share it. Reads
//! hand out owned clones, never references into the log, so nothing a caller
//! does to a returned [`CacheResult`] can reach the stored entries.

use parking_lot::RwLock;

use crate::error::LoanCalcError;
use crate::program::LoanProgram;
use crate::types::{CacheResult, LoanResult};
use crate::LoanCalcResult;

#[derive(Debug, Default)]
pub struct ResultCache {
    items: RwLock<Vec<LoanResult>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, result: LoanResult) {
        let mut items = self.items.write();
        items.push(result);
        tracing::debug!(size = items.len(), "cached loan result");
    }

    /// Every stored result in insertion order.
    pub fn get_all(&self) -> LoanCalcResult<CacheResult> {
        let items = self.items.read();
        if items.is_empty() {
            return Err(LoanCalcError::Empty);
        }
        Ok(CacheResult {
            results: items.clone(),
        })
    }

    /// Stored results whose three program flags equal `program`'s. No match
    /// is an empty view, not an error.
    pub fn get_by_program(&self, program: &LoanProgram) -> CacheResult {
        let items = self.items.read();
        let results = items
            .iter()
            .filter(|item| item.program == *program)
            .cloned()
            .collect();
        CacheResult { results }
    }

    pub fn clear(&self) {
        let mut items = self.items.write();
        let dropped = items.len();
        items.clear();
        tracing::debug!(dropped, "cleared loan result cache");
    }

    pub fn size(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
