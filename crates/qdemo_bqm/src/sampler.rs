//! Sampler trait
//!
//! The seam between model construction and whatever minimises it: a local
//! annealer, an exhaustive solver, or a remote service.

use crate::model::BinaryQuadraticModel;
use crate::sampleset::SampleSet;
use qdemo_core::QdemoResult;

/// Anything that can draw low-energy samples from a model
pub trait Sampler: Send + Sync {
    /// Sampler name (for logging and reports)
    fn name(&self) -> &str;

    /// Draw `num_reads` samples; the result is sorted by energy
    fn sample(&self, bqm: &BinaryQuadraticModel, num_reads: usize) -> QdemoResult<SampleSet>;
}
