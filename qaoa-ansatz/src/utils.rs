//! Helpers for drivers built on top of the encoders

use crate::ansatz::Ansatz;
use crate::bitstring::Bitstring;
use crate::Result;
use qaoa_core::{Circuit, QuantumRegister};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::debug;

/// Random starting angles `(γ, β)` for `depth` layers
///
/// `γ` is drawn from `[0, π]` and `β` from `[0, π/2]`. A seed makes the
/// draw reproducible; without one the generator is seeded from entropy.
pub fn random_initial_parameters(depth: usize, seed: Option<u64>) -> Vec<(f64, f64)> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    (0..depth)
        .map(|_| (rng.gen::<f64>() * PI, rng.gen::<f64>() * FRAC_PI_2))
        .collect()
}

/// Initial state, phase and mixer of `ansatz` composed into one circuit
pub fn qaoa_layer(ansatz: &dyn Ansatz) -> Result<Circuit> {
    let register = QuantumRegister::new(ansatz.num_qubits())?;
    let mut circuit = ansatz.set_initial_state(&register)?;
    circuit.compose(&ansatz.create_phase()?)?;
    circuit.compose(&ansatz.create_mixer()?)?;
    Ok(circuit)
}

/// Exhaustive search for the highest-cost bitstring
///
/// With `feasible_only` set, infeasible bitstrings are ignored and `None` is
/// returned if there are no feasible ones. Ties keep the first bitstring in
/// enumeration order.
///
/// # Errors
/// Returns error if the problem is too large to enumerate
pub fn brute_force_best(
    ansatz: &dyn Ansatz,
    feasible_only: bool,
) -> Result<Option<(Bitstring, f64)>> {
    let mut best: Option<(Bitstring, f64)> = None;
    let mut evaluated = 0usize;

    for x in Bitstring::all(ansatz.num_qubits())? {
        let s = x.to_string();
        if feasible_only && !ansatz.is_feasible(&s)? {
            continue;
        }
        evaluated += 1;

        let cost = ansatz.cost(&s)?;
        if best.as_ref().map_or(true, |(_, c)| cost > *c) {
            best = Some((x, cost));
        }
    }

    debug!(
        problem = ansatz.name(),
        evaluated,
        best = best.as_ref().map(|(_, c)| *c),
        "brute force search finished"
    );
    Ok(best)
}
