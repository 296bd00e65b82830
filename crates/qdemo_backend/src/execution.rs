//! Backend execution types and traits
//!
//! A backend takes a circuit and a shot count and returns measurement counts
//! keyed by classical-register bitstrings, highest classical bit leftmost.

use qdemo_core::{Circuit, Counts, QdemoResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts and provenance of one circuit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Where and how a circuit ran
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Circuit name, when the circuit carried one
    pub circuit: Option<String>,

    /// Qubits in the executed circuit
    pub num_qubits: usize,

    /// Wall-clock time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Seed used (if any)
    pub seed: Option<u64>,
}

impl ExecutionResult {
    /// Result with bare metadata naming only the backend
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                ..Default::default()
            },
        }
    }

    /// Sum of all counts (equals `shots` for a complete run)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Count for an outcome; outcomes never observed count as zero
    pub fn count(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Fraction of shots that produced `bitstring`
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(bitstring) as f64 / self.shots as f64
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExecutionResult(backend={}", self.metadata.backend)?;
        if let Some(name) = &self.metadata.circuit {
            write!(f, ", circuit={}", name)?;
        }
        write!(f, ", shots={}, outcomes={})", self.shots, self.counts.len())
    }
}

/// Anything that can run a circuit for a number of shots
pub trait Backend: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Qubit capacity
    fn num_qubits(&self) -> usize;

    /// Execute a circuit
    fn execute(&self, circuit: &Circuit, shots: u64) -> QdemoResult<ExecutionResult>;
}

// ============================================================================
// Tests
// ============================================================================
