//! Simulator backend for QDemo
//!
//! Basis-state simulator. X, CNOT, CCX and MCX map a computational basis
//! state to a single basis state, so a circuit started in |0…0⟩ is tracked
//! as one bit per qubit. Each gate costs O(controls). Measurements copy the
//! current qubit value into their classical bit. Shots differ only through
//! readout error.

use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use qdemo_core::{Circuit, Counts, Gate, QdemoError, QdemoResult, QubitId};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::Instant;

/// Default qubit capacity
pub const DEFAULT_MAX_QUBITS: usize = 256;

/// Basis-state simulator backend
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Maximum number of qubits accepted
    num_qubits: usize,

    /// Probability of flipping each measured bit
    readout_error: f64,

    /// Random seed
    seed: Option<u64>,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a noiseless simulator accepting up to `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            name: "qdemo_simulator".to_string(),
            num_qubits,
            readout_error: 0.0,
            seed: None,
        }
    }

    /// Create ideal (noiseless) simulator with the default capacity
    pub fn ideal() -> Self {
        Self::new(DEFAULT_MAX_QUBITS)
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set an optional seed
    pub fn with_seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set readout error probability
    pub fn with_readout_error(mut self, p: f64) -> QdemoResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(QdemoError::BackendError(format!(
                "readout error {} must be in [0, 1]",
                p
            )));
        }
        self.readout_error = p;
        Ok(self)
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Readout error probability
    pub fn readout_error(&self) -> f64 {
        self.readout_error
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final basis state of |0…0⟩ under the circuit, indexed by qubit
    pub fn basis_state(&self, circuit: &Circuit) -> Vec<bool> {
        evolve(circuit).0
    }

    /// Draw `shots` readouts of `register`, flipping bits at the readout error rate
    fn sample(&self, register: &[bool], shots: u64, rng: &mut StdRng) -> Counts {
        let mut counts = Counts::new();

        if self.readout_error == 0.0 {
            counts.insert(format_outcome(register), shots);
            return counts;
        }

        let mut noisy = register.to_vec();
        for _ in 0..shots {
            for (bit, &ideal) in noisy.iter_mut().zip(register) {
                *bit = ideal ^ (rng.gen::<f64>() < self.readout_error);
            }
            *counts.entry(format_outcome(&noisy)).or_insert(0) += 1;
        }

        counts
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QdemoResult<ExecutionResult> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(QdemoError::CapacityExceeded {
                required: circuit.num_qubits(),
                max: self.num_qubits,
            });
        }
        if shots == 0 {
            return Err(QdemoError::ZeroShots);
        }

        let started = Instant::now();
        log::debug!(
            "simulating {} qubits, {} gates, {} shots",
            circuit.num_qubits(),
            circuit.gate_count(),
            shots
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (_, register) = evolve(circuit);
        let counts = self.sample(&register, shots, &mut rng);

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                circuit: circuit.name().map(str::to_string),
                num_qubits: circuit.num_qubits(),
                execution_time_ms: Some(started.elapsed().as_millis() as u64),
                seed: self.seed,
            },
        })
    }
}

/// Render a register with the highest bit leftmost
fn format_outcome(bits: &[bool]) -> String {
    bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
}

// ============================================================================
// Gate Application
// ============================================================================

/// Run the circuit once, returning the qubits and the register read out.
///
/// The register is the classical bits when the circuit measures anything,
/// otherwise every qubit.
fn evolve(circuit: &Circuit) -> (Vec<bool>, Vec<bool>) {
    let mut qubits = vec![false; circuit.num_qubits()];
    let mut clbits = vec![false; circuit.num_clbits()];
    let mut measured = false;

    for gate in circuit.gates() {
        match gate {
            Gate::X(t) => apply_controlled_x(&mut qubits, &[], *t),
            Gate::Cnot(c, t) => apply_controlled_x(&mut qubits, &[*c], *t),
            Gate::Ccx(c1, c2, t) => apply_controlled_x(&mut qubits, &[*c1, *c2], *t),
            Gate::Mcx(controls, t) => apply_controlled_x(&mut qubits, controls, *t),
            Gate::Measure(q, c) => {
                clbits[*c] = qubits[*q];
                measured = true;
            }
            Gate::Barrier(_) => {}
        }
    }

    let register = if measured { clbits } else { qubits.clone() };
    (qubits, register)
}

/// Flip `target` when all controls are set
fn apply_controlled_x(qubits: &mut [bool], controls: &[QubitId], target: QubitId) {
    if controls.iter().all(|&c| qubits[c]) {
        qubits[target] = !qubits[target];
    }
}

// ============================================================================
// Tests
// ============================================================================
