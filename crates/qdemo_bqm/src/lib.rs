//! # QDemo BQM
//!
//! Binary quadratic models with linear constraint penalties, and samplers
//! that minimise them.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdemo_bqm::prelude::*;
//!
//! let mut bqm = BinaryQuadraticModel::new();
//! bqm.add_variable("a", 2.0).unwrap();
//! bqm.add_variable("b", 1.0).unwrap();
//!
//! // Exactly one of a, b
//! let terms = vec![("a".to_string(), 1), ("b".to_string(), 1)];
//! bqm.add_linear_equality_constraint(&terms, 10.0, -1).unwrap();
//!
//! let best = ExactSolver::new().solve(&bqm).unwrap();
//! assert_eq!(best.first().unwrap().get("b").unwrap(), 1);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Binary quadratic model
pub mod model;

/// Linear constraint encoding
pub mod constraint;

/// Sample sets
pub mod sampleset;

/// Sampler trait
pub mod sampler;

/// Simulated annealing
pub mod annealer;

/// Exhaustive solver
pub mod exact;

// ============================================================================
// Re-exports
// ============================================================================

pub use annealer::{default_beta_range, SimulatedAnnealingSampler, DEFAULT_NUM_SWEEPS};
pub use constraint::{slack_coefficients, InequalityConstraint, SlackMethod};
pub use exact::{ExactSolver, MAX_EXACT_VARIABLES};
pub use model::{BinaryQuadraticModel, Term};
pub use sampler::Sampler;
pub use sampleset::{Sample, SampleRecord, SampleSet};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::annealer::SimulatedAnnealingSampler;
    pub use crate::constraint::{InequalityConstraint, SlackMethod};
    pub use crate::exact::ExactSolver;
    pub use crate::model::{BinaryQuadraticModel, Term};
    pub use crate::sampler::Sampler;
    pub use crate::sampleset::{Sample, SampleSet};
}

// ============================================================================
// Integration Tests
// ============================================================================
