//! Error types for registers and operator sequences

use crate::QubitId;
use thiserror::Error;

/// Errors that can occur while building an operator sequence
#[derive(Debug, Error)]
pub enum QuantumError {
    /// Qubit index outside the register
    #[error("Invalid qubit index {0}: register has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Register or circuit with no qubits
    #[error("Register must have at least one qubit")]
    EmptyRegister,

    /// Same qubit used twice in a two-qubit operation
    #[error("Duplicate qubit {0} in operation")]
    DuplicateQubit(QubitId),

    /// Two sequences built over registers of different size
    #[error("Register size mismatch: expected {expected} qubits, got {actual}")]
    RegisterMismatch { expected: usize, actual: usize },

    /// Generic validation error
    #[error("Circuit validation failed: {0}")]
    ValidationError(String),

    /// Serialization error
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    /// Deserialization error
    #[error("Deserialization failed: {0}")]
    DeserializationError(String),

    /// Serialized format is newer than this library understands
    #[error("Unsupported circuit format version {actual} (latest supported is {expected})")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create a register mismatch error
    pub fn register_mismatch(expected: usize, actual: usize) -> Self {
        Self::RegisterMismatch { expected, actual }
    }
}
