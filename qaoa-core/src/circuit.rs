//! Operator sequence representation

use crate::gate::{Axis, Operation, ParamExpr};
use crate::{Parameter, QuantumError, QuantumRegister, QubitId, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An operator sequence over a fixed register
///
/// A circuit is append-only: operations are validated against the register
/// size as they are pushed and can never be removed. Encoders build a fresh
/// circuit for every phase or mixer request and hand it out by value.
///
/// # Example
/// ```
/// use qaoa_core::Circuit;
///
/// let circuit = Circuit::new(3).unwrap();
/// assert_eq!(circuit.num_qubits(), 3);
/// assert!(circuit.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyRegister`] if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create an empty circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyRegister);
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        })
    }

    /// Create an empty circuit over an existing register
    pub fn for_register(register: &QuantumRegister) -> Self {
        Self {
            num_qubits: register.size(),
            operations: Vec::new(),
        }
    }

    /// Number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations, barriers included
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append an operation
    ///
    /// # Errors
    /// Returns error if any qubit is outside the register
    pub fn push(&mut self, operation: Operation) -> Result<()> {
        for qubit in operation.qubits() {
            self.check_qubit(qubit)?;
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Append a Hadamard gate
    pub fn h(&mut self, qubit: QubitId) -> Result<()> {
        self.push(Operation::Hadamard { qubit })
    }

    /// Append a rotation around `axis`
    pub fn rotation(&mut self, axis: Axis, qubit: QubitId, angle: ParamExpr) -> Result<()> {
        self.push(Operation::rotation(axis, qubit, angle))
    }

    /// Append an RX rotation
    pub fn rx(&mut self, qubit: QubitId, angle: ParamExpr) -> Result<()> {
        self.rotation(Axis::X, qubit, angle)
    }

    /// Append an RY rotation
    pub fn ry(&mut self, qubit: QubitId, angle: ParamExpr) -> Result<()> {
        self.rotation(Axis::Y, qubit, angle)
    }

    /// Append an RZ rotation
    pub fn rz(&mut self, qubit: QubitId, angle: ParamExpr) -> Result<()> {
        self.rotation(Axis::Z, qubit, angle)
    }

    /// Append a CNOT
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> Result<()> {
        self.push(Operation::cnot(control, target)?)
    }

    /// Append the two-site coupling `exp(-i θ/2 Z_a Z_b)` as
    /// `CNOT(a, b)`, `RZ(b, θ)`, `CNOT(a, b)`
    ///
    /// Both qubits are validated before anything is appended, so a failed
    /// call leaves the circuit untouched.
    pub fn zz_coupling(&mut self, a: QubitId, b: QubitId, angle: ParamExpr) -> Result<()> {
        self.check_qubit(a)?;
        self.check_qubit(b)?;
        let entangle = Operation::cnot(a, b)?;
        self.operations.push(entangle.clone());
        self.operations.push(Operation::rotation(Axis::Z, b, angle));
        self.operations.push(entangle);
        Ok(())
    }

    /// Append a barrier
    pub fn barrier(&mut self) {
        self.operations.push(Operation::Barrier);
    }

    /// Iterate over the operations in order
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Distinct parameters referenced by the circuit, in first-use order
    pub fn parameters(&self) -> Vec<Arc<Parameter>> {
        let mut seen: Vec<Arc<Parameter>> = Vec::new();
        for angle in self.operations.iter().filter_map(Operation::angle) {
            if !seen.iter().any(|p| p == angle.parameter()) {
                seen.push(Arc::clone(angle.parameter()));
            }
        }
        seen
    }

    /// Number of operations per gate name
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of non-empty blocks delimited by barriers
    pub fn num_blocks(&self) -> usize {
        self.operations
            .split(Operation::is_barrier)
            .filter(|block| !block.is_empty())
            .count()
    }

    /// Append all operations of `other`
    ///
    /// # Errors
    /// Returns error if the circuits are built over different register sizes
    pub fn compose(&mut self, other: &Circuit) -> Result<()> {
        if other.num_qubits != self.num_qubits {
            return Err(QuantumError::register_mismatch(
                self.num_qubits,
                other.num_qubits,
            ));
        }
        self.operations.extend(other.operations.iter().cloned());
        Ok(())
    }

    /// Validate the circuit
    ///
    /// Checks that all operations address qubits of this circuit and that no
    /// CNOT uses the same qubit twice.
    pub fn validate(&self) -> Result<()> {
        for (i, op) in self.operations.iter().enumerate() {
            for qubit in op.qubits() {
                if qubit.index() >= self.num_qubits {
                    return Err(QuantumError::ValidationError(format!(
                        "Operation {} uses invalid qubit {}",
                        i, qubit
                    )));
                }
            }
            if let Operation::Cnot { control, target } = op {
                if control == target {
                    return Err(QuantumError::ValidationError(format!(
                        "Operation {} uses qubit {} as both control and target",
                        i, control
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<()> {
        if qubit.index() >= self.num_qubits {
            return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
        }
        Ok(())
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Circuit({} qubits, {} operations)", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gamma() -> Arc<Parameter> {
        Arc::new(Parameter::phase("x_gamma"))
    }

    #[test]
    fn test_circuit_creation() {
        let circuit = Circuit::new(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.len(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_zero_qubits() {
        assert!(matches!(Circuit::new(0), Err(QuantumError::EmptyRegister)));
    }

    #[test]
    fn test_push_invalid_qubit() {
        let mut circuit = Circuit::new(2).unwrap();
        let result = circuit.h(QubitId::new(5));

        if let Err(QuantumError::InvalidQubit(idx, num)) = result {
            assert_eq!(idx, 5);
            assert_eq!(num, 2);
        } else {
            panic!("Expected InvalidQubit error");
        }
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_zz_coupling_gadget() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .zz_coupling(QubitId::new(0), QubitId::new(1), ParamExpr::new(1.5, gamma()))
            .unwrap();

        let names: Vec<_> = circuit.operations().map(|op| op.name()).collect();
        assert_eq!(names, vec!["CNOT", "RZ", "CNOT"]);
        let rz = circuit.get_operation(1).unwrap();
        assert_eq!(rz.qubits().as_slice(), &[QubitId::new(1)]);
        assert_eq!(rz.angle().unwrap().coefficient(), 1.5);
    }

    #[test]
    fn test_zz_coupling_invalid_leaves_circuit_untouched() {
        let mut circuit = Circuit::new(2).unwrap();
        assert!(circuit
            .zz_coupling(QubitId::new(0), QubitId::new(4), ParamExpr::new(1.0, gamma()))
            .is_err());
        assert!(circuit
            .zz_coupling(QubitId::new(1), QubitId::new(1), ParamExpr::new(1.0, gamma()))
            .is_err());
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_parameters_are_deduplicated() {
        let g = gamma();
        let mut circuit = Circuit::new(2).unwrap();
        circuit.rz(QubitId::new(0), ParamExpr::new(1.0, g.clone())).unwrap();
        circuit.rz(QubitId::new(1), ParamExpr::new(2.0, g)).unwrap();
        circuit
            .rx(QubitId::new(0), ParamExpr::new(-2.0, Arc::new(Parameter::mixer("x_beta"))))
            .unwrap();

        let names: Vec<_> = circuit.parameters().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["x_gamma", "x_beta"]);
    }

    #[test]
    fn test_blocks_and_counts() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.barrier();
        circuit.h(QubitId::new(0)).unwrap();
        circuit.h(QubitId::new(1)).unwrap();
        circuit.barrier();
        circuit.cx(QubitId::new(0), QubitId::new(1)).unwrap();
        circuit.barrier();

        assert_eq!(circuit.num_blocks(), 2);
        let counts = circuit.count_ops();
        assert_eq!(counts["H"], 2);
        assert_eq!(counts["BARRIER"], 3);
        assert_eq!(counts["CNOT"], 1);
    }

    #[test]
    fn test_compose() {
        let mut first = Circuit::new(2).unwrap();
        first.h(QubitId::new(0)).unwrap();
        let mut second = Circuit::new(2).unwrap();
        second.h(QubitId::new(1)).unwrap();

        first.compose(&second).unwrap();
        assert_eq!(first.len(), 2);

        let other = Circuit::new(3).unwrap();
        assert!(matches!(
            first.compose(&other),
            Err(QuantumError::RegisterMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_for_register() {
        let register = QuantumRegister::new(4).unwrap();
        let circuit = Circuit::for_register(&register);
        assert_eq!(circuit.num_qubits(), 4);
        assert!(circuit.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(QubitId::new(0)).unwrap();

        let display = format!("{}", circuit);
        assert!(display.contains("2 qubits"));
        assert!(display.contains("1 operations"));
        assert!(display.contains("H(q0)"));
    }
}
