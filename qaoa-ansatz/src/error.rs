//! Error types for problem encoders

use qaoa_core::QuantumError;
use thiserror::Error;

/// Result type for encoder operations
pub type Result<T> = std::result::Result<T, AnsatzError>;

/// Errors raised while constructing encoders or scoring bitstrings
///
/// Construction failures are input errors: they surface immediately and are
/// never retried.
#[derive(Debug, Error)]
pub enum AnsatzError {
    /// A required configuration key is absent
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    /// A parameter has the wrong type, rank or value
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A matrix that must be square is not
    #[error("{name} needs to be a square matrix, but has shape {rows}x{cols}")]
    NotSquare {
        name: String,
        rows: usize,
        cols: usize,
    },

    /// A vector or matrix size disagrees with the problem size
    #[error("{name} is of size {actual} but should be compatible with size {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Candidate solution is malformed
    #[error("invalid bitstring '{bitstring}': {reason}")]
    InvalidBitstring { bitstring: String, reason: String },

    /// Graph with unknown endpoints, self loops or bad weights
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Invalid encoder configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operator sequence construction failed
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    /// Parameter mapping could not be decoded
    #[error("malformed parameters: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnsatzError {
    /// Create a missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid bitstring error
    pub fn invalid_bitstring(bitstring: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBitstring {
            bitstring: bitstring.into(),
            reason: reason.into(),
        }
    }
}
