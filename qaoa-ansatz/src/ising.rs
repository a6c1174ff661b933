//! Spin form of binary objectives and its phase-operator emission
//!
//! A binary objective over `x ∈ {0,1}^n` is rewritten with `x_i = (1 + z_i)/2`,
//! `z_i ∈ {-1, +1}`, as
//!
//! ```text
//! E(z) = offset + Σ_i h_i z_i + Σ_{i<j} J_ij z_i z_j
//! ```
//!
//! The phase operator for `E` is one `RZ(i, h_i γ)` per linear term and one
//! coupling gadget with angle `J_ij γ` per pair. Exact cover and QUBO share
//! this emission so that both use the same spin convention.

use crate::bitstring::Bitstring;
use crate::config::AnsatzConfig;
use crate::{AnsatzError, Result};
use ndarray::{Array1, Array2};
use qaoa_core::{Circuit, ParamExpr, Parameter, QubitId};
use std::sync::Arc;
use tracing::trace;

/// Linear and pairwise spin coefficients plus a constant offset
#[derive(Debug, Clone, PartialEq)]
pub struct IsingModel {
    linear: Array1<f64>,
    couplings: Array2<f64>,
    offset: f64,
}

/// Outcome of appending a phase operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseStats {
    /// Linear terms emitted as rotations
    pub linear_terms: usize,
    /// Pair terms emitted as coupling gadgets
    pub coupling_terms: usize,
    /// Terms dropped because they are within tolerance of zero
    pub skipped_terms: usize,
}

impl IsingModel {
    /// Build a model from explicit coefficients
    ///
    /// Only the strict upper triangle of `couplings` is read.
    ///
    /// # Errors
    /// Returns error if `couplings` is not `n x n` for `n = linear.len()`
    pub fn new(linear: Array1<f64>, couplings: Array2<f64>, offset: f64) -> Result<Self> {
        let n = linear.len();
        if couplings.dim() != (n, n) {
            return Err(AnsatzError::invalid_parameter(
                "couplings",
                format!("expected shape {}x{}, got {:?}", n, n, couplings.dim()),
            ));
        }
        Ok(Self {
            linear,
            couplings,
            offset,
        })
    }

    /// Spin form of `xᵀQx + cᵀx + b`
    ///
    /// With `a_i = Q_ii + c_i` and `p_ij = Q_ij + Q_ji`:
    /// `h_i = a_i/2 + Σ_{j≠i} p_ij/4`, `J_ij = p_ij/4`,
    /// `offset = b + Σ_i a_i/2 + Σ_{i<j} p_ij/4`.
    ///
    /// `q` must be square and `c` must match it; callers validate shapes.
    pub fn from_qubo(q: &Array2<f64>, c: &Array1<f64>, b: f64) -> Self {
        let n = c.len();
        let mut linear = Array1::zeros(n);
        let mut couplings = Array2::zeros((n, n));
        let mut offset = b;

        for i in 0..n {
            let a = q[[i, i]] + c[i];
            linear[i] += a / 2.0;
            offset += a / 2.0;
            for j in (i + 1)..n {
                let quarter = (q[[i, j]] + q[[j, i]]) / 4.0;
                couplings[[i, j]] = quarter;
                linear[i] += quarter;
                linear[j] += quarter;
                offset += quarter;
            }
        }

        Self {
            linear,
            couplings,
            offset,
        }
    }

    /// Number of spins
    #[inline]
    pub fn num_spins(&self) -> usize {
        self.linear.len()
    }

    /// Linear coefficients `h`
    #[inline]
    pub fn linear(&self) -> &Array1<f64> {
        &self.linear
    }

    /// Coupling `J_ij`, symmetric in `i` and `j`; zero on the diagonal
    pub fn coupling(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => self.couplings[[i, j]],
            std::cmp::Ordering::Greater => self.couplings[[j, i]],
            std::cmp::Ordering::Equal => 0.0,
        }
    }

    /// Constant term
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Energy of the spin configuration encoded by `x`
    ///
    /// # Panics
    /// Panics if `x` is shorter than the number of spins
    pub fn energy(&self, x: &Bitstring) -> f64 {
        let z: Vec<f64> = x
            .as_bits()
            .iter()
            .map(|&b| if b { 1.0 } else { -1.0 })
            .collect();
        let n = self.num_spins();

        let mut energy = self.offset;
        for i in 0..n {
            energy += self.linear[i] * z[i];
            for j in (i + 1)..n {
                energy += self.couplings[[i, j]] * z[i] * z[j];
            }
        }
        energy
    }

    /// Append the phase operator for this model to `circuit`
    ///
    /// Terms are emitted site by site: the rotation for `h_i`, then the
    /// gadgets for `J_ij` with `j > i`. Coefficients within
    /// `config.tolerance` of zero produce no operations.
    pub fn append_phase(
        &self,
        circuit: &mut Circuit,
        gamma: &Arc<Parameter>,
        config: &AnsatzConfig,
    ) -> Result<PhaseStats> {
        let n = self.num_spins();
        let mut stats = PhaseStats::default();

        for i in 0..n {
            let h = self.linear[i];
            if config.is_negligible(h) {
                trace!(site = i, coefficient = h, "skipping negligible linear term");
                stats.skipped_terms += 1;
            } else {
                circuit.rz(QubitId::new(i), ParamExpr::new(h, Arc::clone(gamma)))?;
                stats.linear_terms += 1;
            }

            for j in (i + 1)..n {
                let coupling = self.couplings[[i, j]];
                if config.is_negligible(coupling) {
                    trace!(
                        site_a = i,
                        site_b = j,
                        coefficient = coupling,
                        "skipping negligible coupling"
                    );
                    stats.skipped_terms += 1;
                    continue;
                }
                circuit.zz_coupling(
                    QubitId::new(i),
                    QubitId::new(j),
                    ParamExpr::new(coupling, Arc::clone(gamma)),
                )?;
                stats.coupling_terms += 1;
            }
        }

        Ok(stats)
    }
}
