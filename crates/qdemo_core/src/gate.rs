//! Gate definitions for QDemo
//!
//! X and its controlled forms, plus measurement and barrier instructions.
//! Every unitary here maps a computational basis state to another basis state.

use crate::types::{ClbitId, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Pauli-X gate (NOT)
    X(QubitId),

    // ========================================================================
    // Controlled Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    Cnot(QubitId, QubitId),

    /// Toffoli (CCX)
    Ccx(QubitId, QubitId, QubitId),

    /// Multi-controlled X: flips the target when every control is |1⟩
    Mcx(Vec<QubitId>, QubitId),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Measure a qubit into a classical bit
    Measure(QubitId, ClbitId),

    /// Barrier (for timing/visualization)
    Barrier(Vec<QubitId>),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::X(q) | Gate::Measure(q, _) => vec![*q],
            Gate::Cnot(c, t) => vec![*c, *t],
            Gate::Ccx(c1, c2, t) => vec![*c1, *c2, *t],
            Gate::Mcx(controls, t) => {
                let mut qs = controls.clone();
                qs.push(*t);
                qs
            }
            Gate::Barrier(qs) => qs.clone(),
        }
    }

    /// Classical bit written by this gate, if any
    pub fn clbit(&self) -> Option<ClbitId> {
        match self {
            Gate::Measure(_, c) => Some(*c),
            _ => None,
        }
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _))
    }

    /// Check if gate acts on three or more qubits
    pub fn is_multi_qubit(&self) -> bool {
        matches!(self, Gate::Ccx(_, _, _) | Gate::Mcx(_, _))
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_, _))
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X(_) => "x",
            Gate::Cnot(_, _) => "cx",
            Gate::Ccx(_, _, _) => "ccx",
            Gate::Mcx(_, _) => "mcx",
            Gate::Measure(_, _) => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

    /// Validate operand structure (distinct qubits, at least one control)
    pub fn validate_operands(&self) -> Result<(), String> {
        if let Gate::Mcx(controls, _) = self {
            if controls.is_empty() {
                return Err("mcx requires at least one control".to_string());
            }
        }
        if self.is_barrier() {
            return Ok(());
        }
        let qubits = self.qubits();
        for (i, q) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(q) {
                return Err(format!("{} repeats qubit {}", self.name(), q));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Measure(q, c) => write!(f, "measure q[{}] -> c[{}]", q, c),
            Gate::Barrier(qs) if qs.is_empty() => write!(f, "barrier q"),
            _ => {
                let operands: Vec<String> =
                    self.qubits().iter().map(|q| format!("q[{}]", q)).collect();
                write!(f, "{} {}", self.name(), operands.join(","))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::X(0).qubits(), vec![0]);
        assert_eq!(Gate::Cnot(0, 1).qubits(), vec![0, 1]);
        assert_eq!(Gate::Mcx(vec![2, 3, 4], 6).qubits(), vec![2, 3, 4, 6]);
        assert_eq!(Gate::Measure(6, 0).qubits(), vec![6]);
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::Cnot(0, 1).is_two_qubit());
        assert!(Gate::Mcx(vec![0, 1, 2], 3).is_multi_qubit());
        assert!(!Gate::X(0).is_multi_qubit());
        assert!(Gate::Measure(0, 0).is_measurement());
        assert_eq!(Gate::Measure(3, 0).clbit(), Some(0));
        assert_eq!(Gate::X(3).clbit(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Gate::Cnot(0, 4).to_string(), "cx q[0],q[4]");
        assert_eq!(Gate::Mcx(vec![4, 5], 6).to_string(), "mcx q[4],q[5],q[6]");
        assert_eq!(Gate::Measure(6, 0).to_string(), "measure q[6] -> c[0]");
        assert_eq!(Gate::Barrier(vec![]).to_string(), "barrier q");
    }

    #[test]
    fn test_validate_operands() {
        assert!(Gate::Cnot(1, 1).validate_operands().is_err());
        assert!(Gate::Mcx(vec![], 0).validate_operands().is_err());
        assert!(Gate::Mcx(vec![0, 1], 1).validate_operands().is_err());
        assert!(Gate::Mcx(vec![0, 1], 2).validate_operands().is_ok());
        assert!(Gate::Barrier(vec![0, 0]).validate_operands().is_ok());
    }
}
