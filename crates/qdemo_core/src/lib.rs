//! # QDemo Core
//!
//! Core types, errors, gates and circuits shared by the QDemo crates.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdemo_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(3, 1)
//!     .x(0)
//!     .cnot(0, 1)
//!     .ccx(0, 1, 2)
//!     .measure(2, 0)
//!     .build()
//!     .unwrap();
//!
//! println!("{}", circuit);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types
pub mod types;

/// Error types
pub mod error;

/// Quantum gates
pub mod gate;

/// Circuit structure
pub mod circuit;

/// Circuit builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{QdemoError, QdemoResult};
pub use gate::Gate;
pub use types::{Bitstring, ClbitId, Counts, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qdemo_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::error::{QdemoError, QdemoResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Bitstring, ClbitId, Counts, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
