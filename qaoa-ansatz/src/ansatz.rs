//! The capability contract shared by all problem encoders

use crate::config::AnsatzConfig;
use crate::Result;
use qaoa_core::{Circuit, QuantumError, QuantumRegister};
use std::fmt;

/// A QAOA problem encoder
///
/// An ansatz owns fully validated problem data and turns it into two
/// parameterized operator sequences, the phase (cost) operator and the
/// mixer, plus the classical scoring of candidate solutions. Encoders are
/// immutable once constructed: every method takes `&self`, the `create_*`
/// methods return a freshly built circuit on each call, and they may be
/// called in any order, or not at all, without affecting [`Ansatz::cost`].
///
/// Bitstrings are strings of `'0'`/`'1'` of length [`Ansatz::num_qubits`];
/// character `i` is site `i`.
///
/// # Example
/// ```
/// use qaoa_ansatz::{Ansatz, AnsatzConfig, Graph, MaxCut};
///
/// let graph = Graph::cycle(4);
/// let maxcut = MaxCut::new(graph, AnsatzConfig::default()).unwrap();
///
/// let phase = maxcut.create_phase().unwrap();
/// assert_eq!(phase.len(), 4 * 3);
/// assert_eq!(maxcut.cost("0101").unwrap(), 4.0);
/// ```
pub trait Ansatz: Send + Sync + fmt::Debug {
    /// Short problem name, e.g. "MaxCut"
    fn name(&self) -> &str;

    /// Number of register sites
    fn num_qubits(&self) -> usize;

    /// Configuration the encoder was built with
    fn config(&self) -> &AnsatzConfig;

    /// Operations preparing the starting state on `register`
    fn set_initial_state(&self, register: &QuantumRegister) -> Result<Circuit>;

    /// Build the phase (cost) operator
    fn create_phase(&self) -> Result<Circuit>;

    /// Build the mixer operator
    fn create_mixer(&self) -> Result<Circuit>;

    /// Score a candidate solution; higher is better
    fn cost(&self, bitstring: &str) -> Result<f64>;

    /// Whether a candidate satisfies the problem's side constraint
    fn is_feasible(&self, bitstring: &str) -> Result<bool>;
}

/// Uniform superposition: one Hadamard per site of `register`
///
/// # Errors
/// Returns error if the register does not have `num_qubits` sites
pub fn uniform_superposition(
    register: &QuantumRegister,
    num_qubits: usize,
    config: &AnsatzConfig,
) -> Result<Circuit> {
    if register.size() != num_qubits {
        return Err(QuantumError::register_mismatch(num_qubits, register.size()).into());
    }

    let mut circuit = Circuit::for_register(register);
    for qubit in register.qubits() {
        circuit.h(qubit)?;
    }
    if config.use_barrier {
        circuit.barrier();
    }
    Ok(circuit)
}
