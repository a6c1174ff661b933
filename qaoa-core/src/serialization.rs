//! JSON form of operator sequences
//!
//! The serialized circuit is the artifact handed to an external binder or
//! executor. Parameters are written by name and role; on the way back in,
//! operations naming the same parameter share one `Arc<Parameter>` again.

use crate::gate::{Axis, Operation, ParamExpr};
use crate::{Circuit, Parameter, ParameterRole, QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Serialization format version
pub const CIRCUIT_FORMAT_VERSION: u32 = 1;

/// Serialized circuit representation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    /// Number of qubits in the circuit
    pub num_qubits: usize,
    /// Operations in order
    pub operations: Vec<SerializedOperation>,
}

/// Serialized operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedOperation {
    pub gate: String,
    #[serde(default)]
    pub qubits: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<SerializedAngle>,
}

/// Serialized `coefficient * parameter` angle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedAngle {
    pub coefficient: f64,
    pub parameter: String,
    pub role: String,
}

impl SerializedCircuit {
    /// Capture a circuit
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let operations = circuit
            .operations()
            .map(|op| SerializedOperation {
                gate: op.name().to_string(),
                qubits: op.qubits().iter().map(|q| q.index()).collect(),
                angle: op.angle().map(|angle| SerializedAngle {
                    coefficient: angle.coefficient(),
                    parameter: angle.parameter().name().to_string(),
                    role: angle.parameter().role().as_str().to_string(),
                }),
            })
            .collect();

        Self {
            version: CIRCUIT_FORMAT_VERSION,
            num_qubits: circuit.num_qubits(),
            operations,
        }
    }

    /// Check version compatibility
    pub fn check_version(&self) -> Result<()> {
        if self.version > CIRCUIT_FORMAT_VERSION {
            return Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(())
    }

    /// Rebuild the circuit, sharing parameters by name and role
    pub fn into_circuit(self) -> Result<Circuit> {
        self.check_version()?;

        let mut circuit = Circuit::with_capacity(self.num_qubits, self.operations.len())?;
        let mut parameters: HashMap<(String, ParameterRole), Arc<Parameter>> = HashMap::new();

        for (i, op) in self.operations.into_iter().enumerate() {
            let qubit = |k: usize| -> Result<QubitId> {
                op.qubits.get(k).map(|&q| QubitId::new(q)).ok_or_else(|| {
                    QuantumError::DeserializationError(format!(
                        "Operation {} ({}) is missing qubit {}",
                        i, op.gate, k
                    ))
                })
            };

            let operation = match op.gate.as_str() {
                "BARRIER" => Operation::Barrier,
                "H" => Operation::Hadamard { qubit: qubit(0)? },
                "CNOT" => Operation::cnot(qubit(0)?, qubit(1)?)?,
                name => {
                    let axis = Axis::from_gate_name(name).ok_or_else(|| {
                        QuantumError::DeserializationError(format!(
                            "Operation {} has unknown gate '{}'",
                            i, name
                        ))
                    })?;
                    let angle = op.angle.as_ref().ok_or_else(|| {
                        QuantumError::DeserializationError(format!(
                            "Operation {} ({}) has no angle",
                            i, name
                        ))
                    })?;
                    let role = ParameterRole::parse(&angle.role).ok_or_else(|| {
                        QuantumError::DeserializationError(format!(
                            "Operation {} has unknown parameter role '{}'",
                            i, angle.role
                        ))
                    })?;
                    let parameter = parameters
                        .entry((angle.parameter.clone(), role))
                        .or_insert_with(|| Arc::new(Parameter::new(angle.parameter.clone(), role)))
                        .clone();
                    Operation::rotation(axis, qubit(0)?, ParamExpr::new(angle.coefficient, parameter))
                },
            };
            circuit.push(operation)?;
        }

        circuit.validate()?;
        Ok(circuit)
    }
}

impl Circuit {
    /// Serialize circuit to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&SerializedCircuit::from_circuit(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Serialize circuit to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&SerializedCircuit::from_circuit(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Deserialize circuit from JSON
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or describes an invalid circuit
    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedCircuit = serde_json::from_str(json).map_err(|e| {
            QuantumError::DeserializationError(format!("JSON deserialization failed: {}", e))
        })?;
        serialized.into_circuit()
    }
}
