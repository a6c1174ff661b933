//! Exact cover
//!
//! Given a family of `R` candidate subsets of `F` elements, encoded as the
//! incidence matrix `FR` (`FR[f, r] = 1` if subset `r` contains element
//! `f`), select subsets so that every element is covered exactly once. The
//! constraint is enforced through the penalty
//!
//! ```text
//! penalty(x) = Σ_f (1 - Σ_r FR[f, r] x_r)²
//! ```
//!
//! optionally combined with a linear cost `CR · x`, weighted by `mu`.

use crate::ansatz::{uniform_superposition, Ansatz};
use crate::bitstring::Bitstring;
use crate::config::AnsatzConfig;
use crate::ising::IsingModel;
use crate::{mixer, params, AnsatzError, Result};
use ndarray::{Array1, Array2, Axis};
use qaoa_core::{Circuit, QuantumRegister};
use serde_json::Value;
use tracing::debug;

/// Default penalty weight
pub const DEFAULT_MU: f64 = 1.0;

/// Exact cover encoder
///
/// # Example
/// ```
/// use ndarray::array;
/// use qaoa_ansatz::{Ansatz, AnsatzConfig, ExactCover};
///
/// let fr = array![[1.0, 1.0], [0.0, 1.0]];
/// let problem = ExactCover::new(fr, None, 1.0, AnsatzConfig::default()).unwrap();
///
/// assert!(problem.is_feasible("01").unwrap());
/// assert!(!problem.is_feasible("10").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ExactCover {
    fr: Array2<f64>,
    cr: Option<Array1<f64>>,
    mu: f64,
    ising: IsingModel,
    config: AnsatzConfig,
}

impl ExactCover {
    /// Create an exact cover encoder
    ///
    /// # Errors
    /// Returns error if `fr` is empty or non-finite, `cr` does not have one
    /// entry per column of `fr`, `mu` is not finite, or the configuration is
    /// invalid
    pub fn new(
        fr: Array2<f64>,
        cr: Option<Array1<f64>>,
        mu: f64,
        config: AnsatzConfig,
    ) -> Result<Self> {
        config.validate()?;

        let (num_elements, num_subsets) = fr.dim();
        if num_elements == 0 || num_subsets == 0 {
            return Err(AnsatzError::invalid_parameter("FR", "matrix must not be empty"));
        }
        params::ensure_finite("FR", fr.iter())?;
        if let Some(cr) = &cr {
            if cr.len() != num_subsets {
                return Err(AnsatzError::dimension_mismatch("CR", num_subsets, cr.len()));
            }
            params::ensure_finite("CR", cr.iter())?;
        }
        params::ensure_finite("mu", std::iter::once(&mu))?;

        let ising = Self::penalty_model(&fr, cr.as_ref(), mu)?;

        debug!(
            n_qubits = num_subsets,
            n_elements = num_elements,
            has_cost = cr.is_some(),
            mu,
            "constructed ExactCover encoder"
        );
        Ok(Self {
            fr,
            cr,
            mu,
            ising,
            config,
        })
    }

    /// Create from a parameter mapping
    ///
    /// Keys: `FR` (required), `CR`, `mu` (default 1) and `instances`, which
    /// when present must equal the number of columns of `FR`.
    pub fn from_params(params: &Value, config: AnsatzConfig) -> Result<Self> {
        let fr = params::matrix("FR", params::require(params, "FR")?)?;
        let cr = params::optional(params, "CR")
            .map(|value| params::vector("CR", value))
            .transpose()?;
        let mu = params::optional(params, "mu")
            .map(|value| params::scalar("mu", value))
            .transpose()?
            .unwrap_or(DEFAULT_MU);

        if let Some(value) = params::optional(params, "instances") {
            let instances = value
                .as_u64()
                .or_else(|| {
                    value
                        .as_f64()
                        .filter(|count| *count >= 0.0 && count.fract() == 0.0)
                        .map(|count| count as u64)
                })
                .ok_or_else(|| {
                    AnsatzError::invalid_parameter("instances", "expected a non-negative integer")
                })?;
            if instances as usize != fr.ncols() {
                return Err(AnsatzError::dimension_mismatch(
                    "instances",
                    fr.ncols(),
                    instances as usize,
                ));
            }
        }

        Self::new(fr, cr, mu, config)
    }

    // With x_r = (1 + z_r)/2 the objective CR·x + mu·penalty(x) becomes
    //   h_r  = mu/2 · FR[:,r]·(s - 2) + CR_r/2      (s = row sums of FR)
    //   J_rr' = mu/2 · FR[:,r]·FR[:,r']
    //   offset = mu · Σ_f [(1 - s_f/2)² + Σ_r FR[f,r]²/4] + Σ_r CR_r/2
    fn penalty_model(fr: &Array2<f64>, cr: Option<&Array1<f64>>, mu: f64) -> Result<IsingModel> {
        let row_sums = fr.sum_axis(Axis(1));
        let shifted = &row_sums - 2.0;

        let mut linear = fr.t().dot(&shifted) * (0.5 * mu);
        let couplings = fr.t().dot(fr) * (0.5 * mu);
        let mut offset = mu
            * (row_sums.mapv(|s| (1.0 - s / 2.0).powi(2)).sum()
                + 0.25 * fr.mapv(|v| v * v).sum());

        if let Some(cr) = cr {
            linear = linear + cr * 0.5;
            offset += 0.5 * cr.sum();
        }

        IsingModel::new(linear, couplings, offset)
    }

    /// Incidence matrix
    pub fn fr(&self) -> &Array2<f64> {
        &self.fr
    }

    /// Optional linear cost vector
    pub fn cr(&self) -> Option<&Array1<f64>> {
        self.cr.as_ref()
    }

    /// Penalty weight
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Spin form of `CR·x + mu·penalty(x)`
    pub fn ising(&self) -> &IsingModel {
        &self.ising
    }

    /// Linear phase coefficient `h_r`
    pub fn linear_coefficient(&self, r: usize) -> f64 {
        self.ising.linear()[r]
    }

    /// Pair phase coefficient `J_rr'`
    pub fn coupling(&self, r: usize, r2: usize) -> f64 {
        self.ising.coupling(r, r2)
    }

    /// Squared coverage violation of `x`
    pub fn penalty(&self, x: &Bitstring) -> f64 {
        let covered = self.fr.dot(&x.to_vector());
        covered.mapv(|c| (1.0 - c).powi(2)).sum()
    }
}

impl Ansatz for ExactCover {
    fn name(&self) -> &str {
        "ExactCover"
    }

    fn num_qubits(&self) -> usize {
        self.fr.ncols()
    }

    fn config(&self) -> &AnsatzConfig {
        &self.config
    }

    fn set_initial_state(&self, register: &QuantumRegister) -> Result<Circuit> {
        uniform_superposition(register, self.num_qubits(), &self.config)
    }

    fn create_phase(&self) -> Result<Circuit> {
        let gamma = self.config.phase_param();
        let mut circuit = Circuit::new(self.num_qubits())?;

        let stats = self.ising.append_phase(&mut circuit, &gamma, &self.config)?;
        if self.config.use_barrier {
            circuit.barrier();
        }

        debug!(
            linear_terms = stats.linear_terms,
            coupling_terms = stats.coupling_terms,
            skipped = stats.skipped_terms,
            operations = circuit.len(),
            "built ExactCover phase"
        );
        Ok(circuit)
    }

    fn create_mixer(&self) -> Result<Circuit> {
        mixer::x_mixer(self.num_qubits(), &self.config)
    }

    fn cost(&self, bitstring: &str) -> Result<f64> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        let penalty = self.penalty(&x);
        Ok(match &self.cr {
            Some(cr) => -(cr.dot(&x.to_vector()) + self.mu * penalty),
            None => -penalty,
        })
    }

    fn is_feasible(&self, bitstring: &str) -> Result<bool> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        Ok(self.config.is_negligible(self.penalty(&x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use serde_json::json;

    fn three_subsets() -> ExactCover {
        // elements {0,1,2}; subsets {0,1}, {2}, {1,2}
        let fr = array![[1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]];
        ExactCover::new(fr, None, 1.0, AnsatzConfig::default()).unwrap()
    }

    #[test]
    fn test_feasibility() {
        let problem = three_subsets();
        assert!(problem.is_feasible("110").unwrap());
        assert!(!problem.is_feasible("101").unwrap());
        assert!(!problem.is_feasible("000").unwrap());
        assert_eq!(problem.cost("110").unwrap(), 0.0);
        assert_eq!(problem.cost("000").unwrap(), -3.0);
    }

    #[test]
    fn test_coefficients() {
        let fr = array![[1.0, 1.0], [0.0, 1.0]];
        let cr = array![2.0, -1.0];
        let problem = ExactCover::new(fr, Some(cr), 3.0, AnsatzConfig::default()).unwrap();

        // row sums (2, 1): column 0 gives 1*(0) + 0*(-1) = 0, column 1 gives 0 + -1 = -1
        assert_abs_diff_eq!(problem.linear_coefficient(0), 1.0);
        assert_abs_diff_eq!(problem.linear_coefficient(1), 1.5 * -1.0 - 0.5);
        assert_abs_diff_eq!(problem.coupling(0, 1), 1.5);
        assert_abs_diff_eq!(problem.coupling(1, 0), 1.5);
    }

    #[test]
    fn test_cost_with_linear_term() {
        let fr = array![[1.0, 1.0], [0.0, 1.0]];
        let cr = array![2.0, -1.0];
        let problem = ExactCover::new(fr, Some(cr), 3.0, AnsatzConfig::default()).unwrap();

        assert_abs_diff_eq!(problem.cost("01").unwrap(), 1.0);
        assert_abs_diff_eq!(problem.cost("10").unwrap(), -(2.0 + 3.0));
    }

    #[test]
    fn test_energy_matches_cost() {
        let fr = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0]];
        let cr = array![0.5, 1.0, -2.0];
        let problem = ExactCover::new(fr, Some(cr), 2.0, AnsatzConfig::default()).unwrap();

        for x in Bitstring::all(3).unwrap() {
            let cost = problem.cost(&x.to_string()).unwrap();
            assert_abs_diff_eq!(problem.ising().energy(&x), -cost, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phase_emission_order() {
        let fr = array![[1.0, 1.0], [0.0, 1.0]];
        let problem = ExactCover::new(fr, None, 1.0, AnsatzConfig::with_barriers()).unwrap();
        let phase = problem.create_phase().unwrap();

        // h_0 = 0 is skipped; gadget for (0, 1); RZ for h_1; closing barrier
        let names: Vec<_> = phase.operations().map(|op| op.name()).collect();
        assert_eq!(names, vec!["CNOT", "RZ", "CNOT", "RZ", "BARRIER"]);
    }

    #[test]
    fn test_validation() {
        let fr = array![[1.0, 0.0], [0.0, 1.0]];
        assert!(matches!(
            ExactCover::new(fr.clone(), Some(array![1.0]), 1.0, AnsatzConfig::default()),
            Err(AnsatzError::DimensionMismatch { .. })
        ));
        assert!(ExactCover::new(fr, None, f64::NAN, AnsatzConfig::default()).is_err());
        assert!(ExactCover::new(Array2::zeros((0, 2)), None, 1.0, AnsatzConfig::default()).is_err());
    }

    #[test]
    fn test_from_params() {
        let params = json!({ "FR": [[1, 1], [0, 1]], "CR": [1, 1], "mu": 2, "instances": 2 });
        let problem = ExactCover::from_params(&params, AnsatzConfig::default()).unwrap();
        assert_eq!(problem.num_qubits(), 2);
        assert_eq!(problem.mu(), 2.0);
        assert!(problem.cr().is_some());

        let defaults = ExactCover::from_params(&json!({ "FR": [[1]] }), AnsatzConfig::default()).unwrap();
        assert_eq!(defaults.mu(), DEFAULT_MU);

        let wrong_instances = json!({ "FR": [[1, 1]], "instances": 3 });
        assert!(matches!(
            ExactCover::from_params(&wrong_instances, AnsatzConfig::default()),
            Err(AnsatzError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            ExactCover::from_params(&json!({ "CR": [1] }), AnsatzConfig::default()),
            Err(AnsatzError::MissingParameter(key)) if key == "FR"
        ));
    }

    #[test]
    fn test_instances_accepts_integral_float() {
        let params = json!({ "FR": [[1, 0], [0, 1]], "instances": 2.0 });
        assert_eq!(
            ExactCover::from_params(&params, AnsatzConfig::default())
                .unwrap()
                .num_qubits(),
            2
        );

        for bad in [json!(2.5), json!(-2.0), json!("2")] {
            let params = json!({ "FR": [[1, 0], [0, 1]], "instances": bad });
            assert!(matches!(
                ExactCover::from_params(&params, AnsatzConfig::default()),
                Err(AnsatzError::InvalidParameter { name, .. }) if name == "instances"
            ));
        }
    }
}
