//! Budget-constrained portfolio selection
//!
//! Chooses a subset of assets minimizing
//!
//! ```text
//! risk · xᵀΣx - μᵀx + penalty · (Σ_i x_i - budget)²
//! ```
//!
//! which is rewritten once, at construction, as a QUBO with
//!
//! ```text
//! Q = risk · tril(Σ + tril(Σ, -1)) + penalty · (I + 2 · tril(1, -1))
//! c = -μ - 2 · penalty · budget · 1
//! b = penalty · budget²
//! ```

use crate::ansatz::Ansatz;
use crate::bitstring::Bitstring;
use crate::config::AnsatzConfig;
use crate::qubo::Qubo;
use crate::{params, AnsatzError, Result};
use ndarray::{Array1, Array2};
use qaoa_core::{Circuit, QuantumRegister};
use serde_json::Value;
use tracing::debug;

/// Keys a portfolio parameter mapping must provide
pub const REQUIRED_KEYS: [&str; 4] = ["risk", "budget", "cov_matrix", "exp_return"];

/// Inputs of a portfolio problem
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioParams {
    /// Risk aversion weight
    pub risk: f64,
    /// Number of assets to select
    pub budget: f64,
    /// Covariance of asset returns
    pub cov_matrix: Array2<f64>,
    /// Expected asset returns
    pub exp_return: Array1<f64>,
    /// Weight of the budget penalty
    pub penalty: f64,
}

impl PortfolioParams {
    /// Parameters with no budget penalty
    pub fn new(risk: f64, budget: f64, cov_matrix: Array2<f64>, exp_return: Array1<f64>) -> Self {
        Self {
            risk,
            budget,
            cov_matrix,
            exp_return,
            penalty: 0.0,
        }
    }

    /// Set the budget penalty weight
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Read parameters from a mapping
    ///
    /// # Errors
    /// Returns [`AnsatzError::MissingParameter`] naming the first absent key
    /// of [`REQUIRED_KEYS`], or a decoding error for malformed values
    pub fn from_params(params: &Value) -> Result<Self> {
        params::require_keys(params, &REQUIRED_KEYS)?;

        let penalty = params::optional(params, "penalty")
            .map(|value| params::scalar("penalty", value))
            .transpose()?
            .unwrap_or(0.0);

        Ok(Self {
            risk: params::scalar("risk", params::require(params, "risk")?)?,
            budget: params::scalar("budget", params::require(params, "budget")?)?,
            cov_matrix: params::matrix("cov_matrix", params::require(params, "cov_matrix")?)?,
            exp_return: params::vector("exp_return", params::require(params, "exp_return")?)?,
            penalty,
        })
    }

    fn validate(&self, tolerance: f64) -> Result<usize> {
        let n = params::ensure_square("cov_matrix", &self.cov_matrix)?;
        if self.exp_return.len() != n {
            return Err(AnsatzError::dimension_mismatch(
                "exp_return",
                n,
                self.exp_return.len(),
            ));
        }
        params::ensure_finite("cov_matrix", self.cov_matrix.iter())?;
        params::ensure_finite("exp_return", self.exp_return.iter())?;
        for (name, value) in [
            ("risk", self.risk),
            ("budget", self.budget),
            ("penalty", self.penalty),
        ] {
            params::ensure_finite(name, std::iter::once(&value))?;
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let (upper, lower) = (self.cov_matrix[[i, j]], self.cov_matrix[[j, i]]);
                if (upper - lower).abs() > tolerance {
                    return Err(AnsatzError::invalid_parameter(
                        "cov_matrix",
                        format!(
                            "matrix must be symmetric, entries ({}, {}) and ({}, {}) differ: {} vs {}",
                            i, j, j, i, upper, lower
                        ),
                    ));
                }
            }
        }
        Ok(n)
    }

    /// QUBO form `(Q, c, b)` of the penalized objective
    fn to_qubo(&self) -> (Array2<f64>, Array1<f64>, f64) {
        let n = self.exp_return.len();
        let mut q = Array2::zeros((n, n));
        for i in 0..n {
            q[[i, i]] = self.risk * self.cov_matrix[[i, i]] + self.penalty;
            for j in 0..i {
                q[[i, j]] = 2.0 * (self.risk * self.cov_matrix[[i, j]] + self.penalty);
            }
        }
        let c = self.exp_return.mapv(|mu| -mu - 2.0 * self.penalty * self.budget);
        let b = self.penalty * self.budget * self.budget;
        (q, c, b)
    }
}

/// Portfolio encoder, a [`Qubo`] built from [`PortfolioParams`]
///
/// # Example
/// ```
/// use ndarray::array;
/// use qaoa_ansatz::{Ansatz, AnsatzConfig, Portfolio, PortfolioParams};
///
/// let params = PortfolioParams::new(
///     0.5,
///     1.0,
///     array![[0.1, 0.0], [0.0, 0.2]],
///     array![0.3, 0.1],
/// )
/// .with_penalty(2.0);
/// let portfolio = Portfolio::new(params, AnsatzConfig::default()).unwrap();
///
/// assert!(portfolio.is_feasible("10").unwrap());
/// assert!(!portfolio.is_feasible("11").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Portfolio {
    params: PortfolioParams,
    qubo: Qubo,
}

impl Portfolio {
    /// Create a portfolio encoder
    ///
    /// `cov_matrix` only needs to be symmetric up to the configured
    /// tolerance. It is replaced by its symmetric part before anything is
    /// derived from it, so both objectives see the same matrix.
    ///
    /// # Errors
    /// Returns error if `cov_matrix` is not square and symmetric, does not
    /// match `exp_return`, or any value is not finite
    pub fn new(mut params: PortfolioParams, config: AnsatzConfig) -> Result<Self> {
        config.validate()?;
        let n = params.validate(config.tolerance)?;
        params.cov_matrix = (&params.cov_matrix + &params.cov_matrix.t()) * 0.5;

        let (q, c, b) = params.to_qubo();
        let qubo = Qubo::new(q, Some(c), Some(b), config)?;

        debug!(
            n_qubits = n,
            risk = params.risk,
            budget = params.budget,
            penalty = params.penalty,
            "constructed Portfolio encoder"
        );
        Ok(Self { params, qubo })
    }

    /// Create from a parameter mapping
    pub fn from_params(params: &Value, config: AnsatzConfig) -> Result<Self> {
        Self::new(PortfolioParams::from_params(params)?, config)
    }

    /// Problem inputs, with the covariance symmetrized
    pub fn params(&self) -> &PortfolioParams {
        &self.params
    }

    /// The equivalent QUBO
    pub fn qubo(&self) -> &Qubo {
        &self.qubo
    }

    /// Score from the direct objective instead of its QUBO form
    ///
    /// `-(risk · xᵀΣx - μᵀx + penalty · (Σx - budget)²)`, with the penalty
    /// term included only when `penalize` is set. With `penalize` this agrees
    /// with [`Ansatz::cost`].
    pub fn cost_non_qubo(&self, bitstring: &str, penalize: bool) -> Result<f64> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        let v = x.to_vector();
        let p = &self.params;

        let mut cost = p.risk * v.dot(&p.cov_matrix.dot(&v)) - p.exp_return.dot(&v);
        if penalize {
            cost += p.penalty * (v.sum() - p.budget).powi(2);
        }
        Ok(-cost)
    }
}

impl Ansatz for Portfolio {
    fn name(&self) -> &str {
        "Portfolio"
    }

    fn num_qubits(&self) -> usize {
        self.qubo.num_qubits()
    }

    fn config(&self) -> &AnsatzConfig {
        self.qubo.config()
    }

    fn set_initial_state(&self, register: &QuantumRegister) -> Result<Circuit> {
        self.qubo.set_initial_state(register)
    }

    fn create_phase(&self) -> Result<Circuit> {
        self.qubo.create_phase()
    }

    fn create_mixer(&self) -> Result<Circuit> {
        self.qubo.create_mixer()
    }

    fn cost(&self, bitstring: &str) -> Result<f64> {
        self.qubo.cost(bitstring)
    }

    fn is_feasible(&self, bitstring: &str) -> Result<bool> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        let excess = x.hamming_weight() as f64 - self.params.budget;
        Ok(self.config().is_negligible(excess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use serde_json::json;

    fn three_assets() -> Portfolio {
        let params = PortfolioParams::new(
            0.8,
            2.0,
            array![[0.4, 0.1, -0.2], [0.1, 0.3, 0.05], [-0.2, 0.05, 0.5]],
            array![0.2, 0.15, 0.3],
        )
        .with_penalty(1.5);
        Portfolio::new(params, AnsatzConfig::default()).unwrap()
    }

    #[test]
    fn test_qubo_matches_direct_objective() {
        let portfolio = three_assets();
        for x in Bitstring::all(3).unwrap() {
            let s = x.to_string();
            assert_abs_diff_eq!(
                portfolio.cost(&s).unwrap(),
                portfolio.cost_non_qubo(&s, true).unwrap(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_nearly_symmetric_covariance_agrees_at_high_risk() {
        let mut cov = Array2::from_shape_fn((4, 4), |(i, j)| if i == j { 1.0 } else { 0.25 });
        for i in 0..4 {
            for j in (i + 1)..4 {
                cov[[i, j]] += 5e-8;
            }
        }
        let params = PortfolioParams::new(100.0, 2.0, cov, array![0.1, 0.2, 0.3, 0.4]).with_penalty(1.0);
        let portfolio = Portfolio::new(params, AnsatzConfig::default()).unwrap();

        let stored = &portfolio.params().cov_matrix;
        assert_eq!(stored, &stored.t());
        for x in Bitstring::all(4).unwrap() {
            let s = x.to_string();
            assert_abs_diff_eq!(
                portfolio.cost(&s).unwrap(),
                portfolio.cost_non_qubo(&s, true).unwrap(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_qubo_is_lower_triangular() {
        assert!(three_assets().qubo().is_lower_triangular());
    }

    #[test]
    fn test_unpenalized_cost() {
        let portfolio = three_assets();
        // x = 100: 0.8 * 0.4 - 0.2
        assert_abs_diff_eq!(portfolio.cost_non_qubo("100", false).unwrap(), -0.12, epsilon = 1e-12);
        assert_abs_diff_eq!(
            portfolio.cost_non_qubo("100", true).unwrap(),
            -0.12 - 1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_feasibility_is_budget() {
        let portfolio = three_assets();
        assert!(portfolio.is_feasible("110").unwrap());
        assert!(portfolio.is_feasible("011").unwrap());
        assert!(!portfolio.is_feasible("100").unwrap());
        assert!(!portfolio.is_feasible("111").unwrap());
        assert!(portfolio.is_feasible("11").is_err());
    }

    #[test]
    fn test_rejects_asymmetric_covariance() {
        let params = PortfolioParams::new(1.0, 1.0, array![[1.0, 0.5], [0.0, 1.0]], array![0.0, 0.0]);
        assert!(matches!(
            Portfolio::new(params, AnsatzConfig::default()),
            Err(AnsatzError::InvalidParameter { name, .. }) if name == "cov_matrix"
        ));
    }

    #[test]
    fn test_rejects_mismatched_returns() {
        let params = PortfolioParams::new(1.0, 1.0, Array2::eye(2), array![0.0, 0.0, 1.0]);
        assert!(matches!(
            Portfolio::new(params, AnsatzConfig::default()),
            Err(AnsatzError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_from_params() {
        let params = json!({
            "risk": 0.5,
            "budget": 1,
            "cov_matrix": [[1, 0], [0, 1]],
            "exp_return": [0.1, 0.2],
        });
        let portfolio = Portfolio::from_params(&params, AnsatzConfig::default()).unwrap();
        assert_eq!(portfolio.params().penalty, 0.0);
        assert_eq!(portfolio.num_qubits(), 2);

        for key in REQUIRED_KEYS {
            let mut partial = params.clone();
            partial.as_object_mut().unwrap().remove(key);
            assert!(matches!(
                Portfolio::from_params(&partial, AnsatzConfig::default()),
                Err(AnsatzError::MissingParameter(missing)) if missing == key
            ));
        }
    }
}
