//! Maximum cut

use crate::ansatz::{uniform_superposition, Ansatz};
use crate::bitstring::Bitstring;
use crate::config::AnsatzConfig;
use crate::graph::Graph;
use crate::{mixer, params, AnsatzError, Result};
use qaoa_core::{Circuit, ParamExpr, QuantumRegister, QubitId};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// MaxCut encoder over a weighted graph
///
/// Every vertex is one site; each edge `(i, j, w)` contributes the coupling
/// gadget `CNOT(i, j)`, `RZ(j, 2wγ)`, `CNOT(i, j)` to the phase operator.
#[derive(Debug, Clone)]
pub struct MaxCut {
    graph: Graph,
    config: AnsatzConfig,
}

impl MaxCut {
    /// Create a MaxCut encoder
    ///
    /// # Errors
    /// Returns error if the graph has no vertices or the configuration is
    /// invalid
    pub fn new(graph: Graph, config: AnsatzConfig) -> Result<Self> {
        config.validate()?;
        if graph.num_vertices() == 0 {
            return Err(AnsatzError::InvalidGraph(
                "graph must have at least one vertex".to_string(),
            ));
        }

        debug!(
            n_qubits = graph.num_vertices(),
            n_edges = graph.num_edges(),
            "constructed MaxCut encoder"
        );
        Ok(Self { graph, config })
    }

    /// Create from a parameter mapping with the graph under key `"G"`
    pub fn from_params(params: &Value, config: AnsatzConfig) -> Result<Self> {
        let graph = Graph::deserialize(params::require(params, "G")?)?;
        Self::new(graph, config)
    }

    /// The problem graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl Ansatz for MaxCut {
    fn name(&self) -> &str {
        "MaxCut"
    }

    fn num_qubits(&self) -> usize {
        self.graph.num_vertices()
    }

    fn config(&self) -> &AnsatzConfig {
        &self.config
    }

    fn set_initial_state(&self, register: &QuantumRegister) -> Result<Circuit> {
        uniform_superposition(register, self.num_qubits(), &self.config)
    }

    fn create_phase(&self) -> Result<Circuit> {
        let gamma = self.config.phase_param();
        let mut circuit = Circuit::with_capacity(self.num_qubits(), 4 * self.graph.num_edges() + 1)?;

        if self.config.use_barrier {
            circuit.barrier();
        }
        for &(i, j, w) in self.graph.edges() {
            circuit.zz_coupling(
                QubitId::new(i),
                QubitId::new(j),
                ParamExpr::new(2.0 * w, gamma.clone()),
            )?;
            if self.config.use_barrier {
                circuit.barrier();
            }
        }

        debug!(
            n_edges = self.graph.num_edges(),
            operations = circuit.len(),
            "built MaxCut phase"
        );
        Ok(circuit)
    }

    fn create_mixer(&self) -> Result<Circuit> {
        mixer::x_mixer(self.num_qubits(), &self.config)
    }

    fn cost(&self, bitstring: &str) -> Result<f64> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        Ok(self.graph.cut_value(x.as_bits()))
    }

    fn is_feasible(&self, bitstring: &str) -> Result<bool> {
        Bitstring::parse(bitstring, self.num_qubits())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaoa_core::Operation;
    use serde_json::json;

    fn triangle() -> MaxCut {
        let graph = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 0.5)]).unwrap();
        MaxCut::new(graph, AnsatzConfig::default()).unwrap()
    }

    #[test]
    fn test_phase_gadget_per_edge() {
        let maxcut = triangle();
        let phase = maxcut.create_phase().unwrap();
        assert_eq!(phase.len(), 9);

        match phase.get_operation(4).unwrap() {
            Operation::Rotation { qubit, angle, .. } => {
                assert_eq!(qubit.index(), 2);
                assert_eq!(angle.coefficient(), 4.0);
                assert_eq!(angle.parameter().name(), "x_gamma");
            },
            other => panic!("unexpected operation {}", other),
        }
        assert_eq!(
            phase.get_operation(3).unwrap(),
            &Operation::Cnot {
                control: QubitId::new(1),
                target: QubitId::new(2)
            }
        );
    }

    #[test]
    fn test_barriers_fence_every_edge() {
        let graph = Graph::path(3);
        let maxcut = MaxCut::new(graph, AnsatzConfig::with_barriers()).unwrap();
        let phase = maxcut.create_phase().unwrap();
        assert_eq!(phase.len(), 9);
        assert_eq!(phase.num_blocks(), 2);
        for index in [0, 4, 8] {
            assert!(phase.get_operation(index).unwrap().is_barrier());
        }
        assert!(!phase.get_operation(1).unwrap().is_barrier());
    }

    #[test]
    fn test_cost() {
        let maxcut = triangle();
        assert_eq!(maxcut.cost("000").unwrap(), 0.0);
        assert_eq!(maxcut.cost("111").unwrap(), 0.0);
        assert_eq!(maxcut.cost("010").unwrap(), 3.0);
        assert_eq!(maxcut.cost("100").unwrap(), 1.5);
        assert!(maxcut.cost("01").is_err());
    }

    #[test]
    fn test_every_bitstring_feasible() {
        let maxcut = triangle();
        for x in Bitstring::all(3).unwrap() {
            assert!(maxcut.is_feasible(&x.to_string()).unwrap());
        }
        assert!(maxcut.is_feasible("0x1").is_err());
    }

    #[test]
    fn test_from_params() {
        let params = json!({ "G": { "edges": [[0, 1], [1, 2, 3.0]] } });
        let maxcut = MaxCut::from_params(&params, AnsatzConfig::default()).unwrap();
        assert_eq!(maxcut.num_qubits(), 3);
        assert_eq!(maxcut.cost("010").unwrap(), 4.0);

        assert!(matches!(
            MaxCut::from_params(&json!({}), AnsatzConfig::default()),
            Err(AnsatzError::MissingParameter(key)) if key == "G"
        ));
    }

    #[test]
    fn test_empty_graph_rejected() {
        assert!(MaxCut::new(Graph::path(0), AnsatzConfig::default()).is_err());
    }
}
