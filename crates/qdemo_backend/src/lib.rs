//! # QDemo Backend
//!
//! Circuit execution abstraction and a basis-state simulator.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdemo_backend::prelude::*;
//! use qdemo_core::CircuitBuilder;
//!
//! let backend = SimulatorBackend::ideal().with_seed(42);
//!
//! let circuit = CircuitBuilder::new(2, 1)
//!     .x(0)
//!     .cnot(0, 1)
//!     .measure(1, 0)
//!     .build()
//!     .unwrap();
//!
//! let result = backend.execute(&circuit, 1024).unwrap();
//! assert_eq!(result.count("1"), 1024);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait
pub mod execution;

/// Basis-state simulator backend
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use simulator::{SimulatorBackend, DEFAULT_MAX_QUBITS};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qdemo_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::SimulatorBackend;
}

// ============================================================================
// Integration Tests
// ============================================================================
