//! # QDemo Compare
//!
//! Integer equality decided by a quantum circuit, and a rectangle test built
//! from three pairwise comparisons.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdemo_compare::prelude::*;
//!
//! let comparator = Comparator::simulator(ComparatorConfig::default().with_seed(1));
//! assert!(comparator.compare(12, 12).unwrap());
//! assert!(comparator.is_rectangle(5, 6, 6, 5).unwrap());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Equality circuit and comparator
pub mod comparator;

/// Rectangle test
pub mod rectangle;

// ============================================================================
// Re-exports
// ============================================================================

pub use comparator::{
    aligned_operands, build_circuit, compare, num_to_bitstring, Comparator, ComparatorConfig,
};
pub use rectangle::is_rectangle;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::comparator::{build_circuit, compare, Comparator, ComparatorConfig};
    pub use crate::rectangle::is_rectangle;
}

// ============================================================================
// Integration Tests
// ============================================================================
