//! Circuit builder for QDemo
//!
//! Fluent builder for constructing circuits. The first invalid gate is
//! remembered and reported by [`CircuitBuilder::build`].

use crate::circuit::Circuit;
use crate::error::{QdemoError, QdemoResult};
use crate::gate::Gate;
use crate::types::{Bitstring, ClbitId, QubitId};

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First rejected gate, if any
    error: Option<QdemoError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits, num_clbits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, num_clbits, name),
            error: None,
        }
    }

    /// Append a gate, keeping the first error
    pub fn gate(mut self, gate: Gate) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.circuit.add_gate(gate) {
                self.error = Some(err);
            }
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.gate(Gate::X(qubit))
    }

    // ========================================================================
    // Controlled Gates
    // ========================================================================

    /// Add CNOT gate
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Add Toffoli (CCX) gate
    pub fn ccx(self, c1: QubitId, c2: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Ccx(c1, c2, target))
    }

    /// Add multi-controlled X over an arbitrary control set
    pub fn mcx(self, controls: impl IntoIterator<Item = QubitId>, target: QubitId) -> Self {
        self.gate(Gate::Mcx(controls.into_iter().collect(), target))
    }

    // ========================================================================
    // Register Operations
    // ========================================================================

    /// Apply X to `offset + i` for every set bit `i` of `bits`
    pub fn encode_bits(mut self, bits: &Bitstring, offset: QubitId) -> Self {
        for i in bits.ones() {
            self = self.x(offset + i);
        }
        self
    }

    /// Apply X to every qubit in the range
    pub fn x_range(mut self, qubits: std::ops::Range<QubitId>) -> Self {
        for q in qubits {
            self = self.x(q);
        }
        self
    }

    // ========================================================================
    // Measurement and Control
    // ========================================================================

    /// Measure a qubit into a classical bit
    pub fn measure(self, qubit: QubitId, clbit: ClbitId) -> Self {
        self.gate(Gate::Measure(qubit, clbit))
    }

    /// Add barrier across all qubits
    pub fn barrier(self) -> Self {
        let qubits: Vec<QubitId> = (0..self.circuit.num_qubits()).collect();
        self.gate(Gate::Barrier(qubits))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, failing on the first rejected gate
    pub fn build(self) -> QdemoResult<Circuit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3, 1)
            .x(0)
            .cnot(0, 1)
            .ccx(0, 1, 2)
            .measure(2, 0)
            .build()
            .unwrap();

        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.gate_count(), 4);
    }

    #[test]
    fn test_builder_keeps_first_error() {
        let result = CircuitBuilder::new(2, 0).x(0).x(7).cnot(0, 9).build();
        assert_eq!(
            result.unwrap_err(),
            QdemoError::GateQubitMismatch {
                qubit: 7,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_encode_bits() {
        let bits = Bitstring::parse("101").unwrap();
        let circuit = CircuitBuilder::new(6, 0)
            .encode_bits(&bits, 3)
            .build()
            .unwrap();

        assert_eq!(circuit.gates(), &[Gate::X(3), Gate::X(5)]);
    }

    #[test]
    fn test_x_range_and_mcx() {
        let circuit = CircuitBuilder::new(4, 0)
            .x_range(0..3)
            .mcx(0..3, 3)
            .build()
            .unwrap();

        assert_eq!(circuit.gates()[..3], [Gate::X(0), Gate::X(1), Gate::X(2)]);
        assert_eq!(circuit.count_multi(), 1);
    }

    #[test]
    fn test_barrier_spans_register() {
        let builder = CircuitBuilder::new(3, 0).barrier();
        assert_eq!(builder.num_qubits(), 3);
        assert_eq!(builder.circuit().gates(), &[Gate::Barrier(vec![0, 1, 2])]);
    }
}
