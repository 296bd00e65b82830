//! # QDemo Pump
//!
//! Schedules pumps across shifts to meet a daily flow demand at minimum cost,
//! posed as a binary quadratic model and handed to any [`Sampler`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qdemo_pump::prelude::*;
//!
//! let problem = PumpProblem::default();
//! let sampler = SimulatedAnnealingSampler::new().with_seed(7);
//!
//! let schedule = solve(&problem, &sampler).unwrap();
//! print!("{}", schedule);
//! ```
//!
//! [`Sampler`]: qdemo_bqm::Sampler

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Problem configuration
pub mod config;

/// BQM encoding and solve
pub mod encoder;

/// Schedule extraction and report
pub mod schedule;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PumpProblem;
pub use encoder::{build_bqm, solve};
pub use schedule::Schedule;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::config::PumpProblem;
    pub use crate::encoder::{build_bqm, solve};
    pub use crate::schedule::Schedule;
    pub use qdemo_bqm::{ExactSolver, Sampler, SimulatedAnnealingSampler};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
