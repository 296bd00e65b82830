//! Error types for QDemo
//!
//! One error enum shared by the circuit, backend, and model crates.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QDemo
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QdemoError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Classical bit index out of range
    #[error("Classical bit {clbit} out of range: circuit has {num_clbits} classical bits")]
    ClbitOutOfRange { clbit: usize, num_clbits: usize },

    /// Variable label rejected by the model
    #[error("Invalid variable label '{0}': must be non-empty")]
    InvalidLabel(String),

    /// Variable not present in a model or sample
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    /// Problem data with inconsistent dimensions or values
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Inequality constraint whose bounds admit no value
    #[error("Infeasible constraint '{label}': lower bound {lb} exceeds upper bound {ub}")]
    InfeasibleConstraint { label: String, lb: i64, ub: i64 },

    /// Model too large for exhaustive enumeration
    #[error("Model has {num_variables} variables, exact solver limit is {max}")]
    TooManyVariables { num_variables: usize, max: usize },

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Gate whose operands overlap or are missing
    #[error("Invalid gate: {0}")]
    InvalidGate(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Zero shots or reads requested
    #[error("Shots must be > 0")]
    ZeroShots,

    /// Circuit wider than the backend
    #[error("Circuit needs {required} qubits, backend capacity is {max}")]
    CapacityExceeded { required: usize, max: usize },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for QDemo operations
pub type QdemoResult<T> = Result<T, QdemoError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QdemoError {
    fn from(err: serde_json::Error) -> Self {
        QdemoError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QdemoError {
    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QdemoError::InvalidBitstring(_)
                | QdemoError::QubitOutOfRange { .. }
                | QdemoError::ClbitOutOfRange { .. }
                | QdemoError::InvalidLabel(_)
                | QdemoError::UnknownVariable(_)
                | QdemoError::InvalidProblem(_)
                | QdemoError::InfeasibleConstraint { .. }
                | QdemoError::TooManyVariables { .. }
        )
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QdemoError::GateQubitMismatch { .. } | QdemoError::InvalidGate(_)
        )
    }

    /// Check if error was raised by a backend
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            QdemoError::BackendError(_)
                | QdemoError::ZeroShots
                | QdemoError::CapacityExceeded { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QdemoError::InvalidBitstring("01x".into());
        assert!(err.to_string().contains("01x"));
    }

    #[test]
    fn test_infeasible_display() {
        let err = QdemoError::InfeasibleConstraint {
            label: "c1".into(),
            lb: 5,
            ub: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("c1"));
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(QdemoError::UnknownVariable("x".into()).is_validation_error());
        assert!(!QdemoError::BackendError("test".into()).is_validation_error());
    }

    #[test]
    fn test_is_circuit_error() {
        assert!(QdemoError::InvalidGate("cx".into()).is_circuit_error());
        assert!(!QdemoError::ZeroShots.is_circuit_error());
    }

    #[test]
    fn test_capacity_exceeded_is_backend_error() {
        let err = QdemoError::CapacityExceeded {
            required: 300,
            max: 256,
        };
        assert!(err.is_backend_error());
        assert!(!err.is_validation_error());
        assert!(!err.is_circuit_error());
        assert!(err.to_string().contains("300"));
        assert!(!QdemoError::QubitOutOfRange { qubit: 3, max: 2 }.is_backend_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: QdemoError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, QdemoError::JsonError(_)));
    }
}
