//! Quadratic unconstrained binary optimization
//!
//! Minimizes `xᵀQx + cᵀx + b` over `x ∈ {0,1}^n`. The cost reported to the
//! optimizer is the negated objective, so higher is better.

use crate::ansatz::{uniform_superposition, Ansatz};
use crate::bitstring::Bitstring;
use crate::config::AnsatzConfig;
use crate::ising::IsingModel;
use crate::{mixer, params, AnsatzError, Result};
use ndarray::{Array1, Array2};
use qaoa_core::{Circuit, QuantumRegister};
use serde_json::Value;
use tracing::debug;

/// Absolute tolerance for treating an upper-triangle entry of `Q` as zero
pub const LOWER_TRIANGULAR_ATOL: f64 = 1e-8;

/// QUBO encoder
///
/// # Example
/// ```
/// use ndarray::array;
/// use qaoa_ansatz::{Ansatz, AnsatzConfig, Qubo};
///
/// let q = array![[1.0, 0.0], [-3.0, 1.0]];
/// let qubo = Qubo::new(q, None, None, AnsatzConfig::default()).unwrap();
///
/// assert!(qubo.is_lower_triangular());
/// assert_eq!(qubo.cost("11").unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Qubo {
    q: Array2<f64>,
    c: Array1<f64>,
    b: f64,
    lower_triangular: bool,
    ising: IsingModel,
    config: AnsatzConfig,
}

impl Qubo {
    /// Create a QUBO encoder; `c` defaults to zeros and `b` to 0
    ///
    /// # Errors
    /// Returns error if `q` is not square, `c` does not match it, any entry
    /// is not finite, or the configuration is invalid
    pub fn new(
        q: Array2<f64>,
        c: Option<Array1<f64>>,
        b: Option<f64>,
        config: AnsatzConfig,
    ) -> Result<Self> {
        config.validate()?;

        let n = params::ensure_square("Q", &q)?;
        params::ensure_finite("Q", q.iter())?;

        let c = c.unwrap_or_else(|| Array1::zeros(n));
        if c.len() != n {
            return Err(AnsatzError::dimension_mismatch("c", n, c.len()));
        }
        params::ensure_finite("c", c.iter())?;

        let b = b.unwrap_or(0.0);
        params::ensure_finite("b", std::iter::once(&b))?;

        let lower_triangular = q
            .indexed_iter()
            .all(|((i, j), v)| j <= i || v.abs() <= LOWER_TRIANGULAR_ATOL);
        let ising = IsingModel::from_qubo(&q, &c, b);

        debug!(n_qubits = n, lower_triangular, "constructed QUBO encoder");
        Ok(Self {
            q,
            c,
            b,
            lower_triangular,
            ising,
            config,
        })
    }

    /// Create from a parameter mapping with keys `Q`, `c` and `b`
    pub fn from_params(params: &Value, config: AnsatzConfig) -> Result<Self> {
        let q = params::matrix("Q", params::require(params, "Q")?)?;
        let c = params::optional(params, "c")
            .map(|value| params::vector("c", value))
            .transpose()?;
        let b = params::optional(params, "b")
            .map(|value| params::scalar("b", value))
            .transpose()?;
        Self::new(q, c, b, config)
    }

    pub fn q(&self) -> &Array2<f64> {
        &self.q
    }

    pub fn c(&self) -> &Array1<f64> {
        &self.c
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Whether `Q` has no entries above the diagonal
    ///
    /// Informational only; any square `Q` is accepted.
    pub fn is_lower_triangular(&self) -> bool {
        self.lower_triangular
    }

    /// Spin form of the objective
    pub fn ising(&self) -> &IsingModel {
        &self.ising
    }

    /// `xᵀQx + cᵀx + b`
    pub fn objective(&self, x: &Bitstring) -> f64 {
        let v = x.to_vector();
        v.dot(&self.q.dot(&v)) + self.c.dot(&v) + self.b
    }
}

impl Ansatz for Qubo {
    fn name(&self) -> &str {
        "QUBO"
    }

    fn num_qubits(&self) -> usize {
        self.c.len()
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
            "built QUBO phase"
        );
        Ok(circuit)
    }

    fn create_mixer(&self) -> Result<Circuit> {
        mixer::x_mixer(self.num_qubits(), &self.config)
    }

    fn cost(&self, bitstring: &str) -> Result<f64> {
        let x = Bitstring::parse(bitstring, self.num_qubits())?;
        Ok(-self.objective(&x))
    }

    fn is_feasible(&self, bitstring: &str) -> Result<bool> {
        Bitstring::parse(bitstring, self.num_qubits())?;
        Ok(true)
    }
}
