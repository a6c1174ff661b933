//! Mixer operators

use crate::config::AnsatzConfig;
use crate::Result;
use qaoa_core::{Circuit, ParamExpr, QubitId};
use tracing::debug;

/// Standard X mixer: `RX(q, -2β)` on every site, in site order
///
/// The rotation axis is orthogonal to the Z axis used by the phase
/// operators. A barrier closes the layer when barriers are enabled. This is
/// the mixer used by every encoder that does not need a
/// constraint-preserving one.
///
/// # Example
/// ```
/// use qaoa_ansatz::{mixer, AnsatzConfig};
///
/// let circuit = mixer::x_mixer(3, &AnsatzConfig::default()).unwrap();
/// assert_eq!(circuit.len(), 3);
/// assert_eq!(circuit.parameters()[0].name(), "x_beta");
/// ```
pub fn x_mixer(num_qubits: usize, config: &AnsatzConfig) -> Result<Circuit> {
    let beta = config.mixer_param();
    let angle = ParamExpr::new(-2.0, beta);

    let mut circuit = Circuit::with_capacity(num_qubits, num_qubits + 1)?;
    for q in 0..num_qubits {
        circuit.rx(QubitId::new(q), angle.clone())?;
    }
    if config.use_barrier {
        circuit.barrier();
    }

    debug!(num_qubits, operations = circuit.len(), "built X mixer");
    Ok(circuit)
}
