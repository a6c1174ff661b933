//! Elementary operations of an operator sequence

use crate::{Parameter, QuantumError, QubitId, Result};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::Arc;

/// Rotation axis of a single-qubit rotation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Gate name of a rotation around this axis
    pub fn gate_name(&self) -> &'static str {
        match self {
            Axis::X => "RX",
            Axis::Y => "RY",
            Axis::Z => "RZ",
        }
    }

    /// Axis for a rotation gate name (`"RX"`, `"RY"`, `"RZ"`)
    pub fn from_gate_name(name: &str) -> Option<Self> {
        match name {
            "RX" => Some(Axis::X),
            "RY" => Some(Axis::Y),
            "RZ" => Some(Axis::Z),
            _ => None,
        }
    }
}

/// A rotation angle of the form `coefficient * parameter`
///
/// # Example
/// ```
/// use qaoa_core::{ParamExpr, Parameter};
/// use std::sync::Arc;
///
/// let beta = Arc::new(Parameter::mixer("x_beta"));
/// let angle = ParamExpr::new(-2.0, beta);
/// assert_eq!(angle.bind(0.25), -0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParamExpr {
    coefficient: f64,
    parameter: Arc<Parameter>,
}

impl ParamExpr {
    /// Create a scaled parameter reference
    pub fn new(coefficient: f64, parameter: Arc<Parameter>) -> Self {
        Self {
            coefficient,
            parameter,
        }
    }

    /// Real weight multiplying the parameter
    #[inline]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// The referenced parameter
    #[inline]
    pub fn parameter(&self) -> &Arc<Parameter> {
        &self.parameter
    }

    /// Numeric angle once the parameter is bound to `value`
    #[inline]
    pub fn bind(&self, value: f64) -> f64 {
        self.coefficient * value
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.coefficient, self.parameter.name())
    }
}

/// An operation applied to one or two sites
///
/// The two-site coupling `exp(-i θ/2 Z_a Z_b)` is not a primitive: it is
/// appended as `CNOT(a, b)`, `RZ(b, θ)`, `CNOT(a, b)` by
/// [`Circuit::zz_coupling`](crate::Circuit::zz_coupling).
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Hadamard gate, used for initial-state preparation
    Hadamard { qubit: QubitId },
    /// Parameterized single-qubit rotation
    Rotation {
        axis: Axis,
        qubit: QubitId,
        angle: ParamExpr,
    },
    /// Controlled-NOT
    Cnot { control: QubitId, target: QubitId },
    /// Scheduling boundary with no computational effect
    Barrier,
}

impl Operation {
    /// Create a rotation
    pub fn rotation(axis: Axis, qubit: QubitId, angle: ParamExpr) -> Self {
        Operation::Rotation { axis, qubit, angle }
    }

    /// Create a CNOT
    ///
    /// # Errors
    /// Returns error if `control == target`
    pub fn cnot(control: QubitId, target: QubitId) -> Result<Self> {
        if control == target {
            return Err(QuantumError::DuplicateQubit(control));
        }
        Ok(Operation::Cnot { control, target })
    }

    /// Gate name (e.g. "H", "RZ", "CNOT", "BARRIER")
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::Rotation { axis, .. } => axis.gate_name(),
            Operation::Cnot { .. } => "CNOT",
            Operation::Barrier => "BARRIER",
        }
    }

    /// Qubits this operation acts on, control first for CNOT
    ///
    /// A barrier spans the whole register and reports no qubits.
    pub fn qubits(&self) -> SmallVec<[QubitId; 2]> {
        match self {
            Operation::Hadamard { qubit } | Operation::Rotation { qubit, .. } => smallvec![*qubit],
            Operation::Cnot { control, target } => smallvec![*control, *target],
            Operation::Barrier => SmallVec::new(),
        }
    }

    /// Number of qubits this operation acts on
    pub fn num_qubits(&self) -> usize {
        self.qubits().len()
    }

    /// Symbolic angle, for parameterized operations
    pub fn angle(&self) -> Option<&ParamExpr> {
        match self {
            Operation::Rotation { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Whether this is a barrier
    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self, Operation::Barrier)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Barrier => write!(f, "BARRIER"),
            Operation::Rotation { axis, qubit, angle } => {
                write!(f, "{}[{}]({})", axis.gate_name(), angle, qubit)
            },
            _ => {
                write!(f, "{}(", self.name())?;
                for (i, q) in self.qubits().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", q)?;
                }
                write!(f, ")")
            },
        }
    }
}
