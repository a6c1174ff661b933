//! Core types for building QAOA operator sequences
//!
//! This crate provides the symbolic building blocks consumed by the
//! problem encoders in `qaoa-ansatz`:
//! - [`QubitId`] and [`QuantumRegister`]: type-safe site addressing
//! - [`Parameter`]: a named placeholder angle, bound only at execution time
//! - [`Operation`]: elementary operations over one or two sites
//! - [`Circuit`]: an append-only operator sequence
//!
//! # Example
//! ```
//! use qaoa_core::{Circuit, ParamExpr, Parameter, QubitId};
//! use std::sync::Arc;
//!
//! let gamma = Arc::new(Parameter::phase("x_gamma"));
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit
//!     .zz_coupling(QubitId::new(0), QubitId::new(1), ParamExpr::new(2.0, gamma))
//!     .unwrap();
//! assert_eq!(circuit.len(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod parameter;
pub mod qubit;

#[cfg(feature = "serialization")]
pub mod serialization;

// Re-exports for convenience
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{Axis, Operation, ParamExpr};
pub use parameter::{Parameter, ParameterRole};
pub use qubit::{QuantumRegister, QubitId};

/// Type alias for results in qaoa-core
pub type Result<T> = std::result::Result<T, QuantumError>;
