//! Exhaustive solver for small models

use crate::model::BinaryQuadraticModel;
use crate::sampler::Sampler;
use crate::sampleset::{SampleRecord, SampleSet};
use qdemo_core::{QdemoError, QdemoResult};

/// Largest model the exact solver will enumerate
pub const MAX_EXACT_VARIABLES: usize = 20;

/// Enumerates every assignment and returns them sorted by energy.
///
/// `num_reads` is ignored beyond being nonzero; every state is returned once.
#[derive(Debug, Clone, Default)]
pub struct ExactSolver;

impl ExactSolver {
    /// Create a new exact solver
    pub fn new() -> Self {
        Self
    }

    /// Enumerate all `2^n` states
    pub fn solve(&self, bqm: &BinaryQuadraticModel) -> QdemoResult<SampleSet> {
        let n = bqm.num_variables();
        if n > MAX_EXACT_VARIABLES {
            return Err(QdemoError::TooManyVariables {
                num_variables: n,
                max: MAX_EXACT_VARIABLES,
            });
        }

        log::debug!("enumerating {} states", 1u64 << n);

        let records = (0..1u64 << n)
            .map(|state| {
                let values: Vec<u8> = (0..n).map(|i| ((state >> i) & 1) as u8).collect();
                let energy = bqm.energy_unchecked(&values);
                SampleRecord {
                    values,
                    energy,
                    num_occurrences: 1,
                }
            })
            .collect();

        Ok(SampleSet::from_records(bqm.variables().to_vec(), records))
    }
}

impl Sampler for ExactSolver {
    fn name(&self) -> &str {
        "exact"
    }

    fn sample(&self, bqm: &BinaryQuadraticModel, num_reads: usize) -> QdemoResult<SampleSet> {
        if num_reads == 0 {
            return Err(QdemoError::ZeroShots);
        }
        self.solve(bqm)
    }
}
