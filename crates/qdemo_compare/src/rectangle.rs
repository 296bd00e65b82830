//! Rectangle test from four side lengths
//!
//! Four sides can close a rectangle when they split into two pairs of equal
//! length. Angles are not considered.

use crate::comparator::Comparator;
use qdemo_backend::{Backend, SimulatorBackend};
use qdemo_core::QdemoResult;

impl<B: Backend> Comparator<B> {
    /// True iff `(a=b ∧ c=d) ∨ (a=c ∧ b=d) ∨ (a=d ∧ b=c)`.
    ///
    /// Pairings are tried in that order and each conjunction stops at its
    /// first unequal pair, so no more circuits run than needed.
    pub fn is_rectangle(&self, a: u64, b: u64, c: u64, d: u64) -> QdemoResult<bool> {
        for ((w, x), (y, z)) in [((a, b), (c, d)), ((a, c), (b, d)), ((a, d), (b, c))] {
            if self.compare(w, x)? && self.compare(y, z)? {
                log::debug!("sides pair as ({}, {}) and ({}, {})", w, x, y, z);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Rectangle test on the default simulator
pub fn is_rectangle(a: u64, b: u64, c: u64, d: u64) -> QdemoResult<bool> {
    Comparator::<SimulatorBackend>::default().is_rectangle(a, b, c, d)
}

// ============================================================================
// Tests
// ============================================================================
