//! Selecting an encoder by name

use crate::ansatz::Ansatz;
use crate::config::AnsatzConfig;
use crate::{AnsatzError, ExactCover, MaxCut, Portfolio, Qubo, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Problem families with an encoder
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    MaxCut,
    ExactCover,
    Qubo,
    Portfolio,
}

impl ProblemKind {
    /// All problem kinds
    pub const ALL: [ProblemKind; 4] = [
        ProblemKind::MaxCut,
        ProblemKind::ExactCover,
        ProblemKind::Qubo,
        ProblemKind::Portfolio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::MaxCut => "maxcut",
            ProblemKind::ExactCover => "exactcover",
            ProblemKind::Qubo => "qubo",
            ProblemKind::Portfolio => "portfolio",
        }
    }

    /// Build the encoder for this kind from a parameter mapping
    ///
    /// The optional `"config"` entry of `params` configures the encoder.
    ///
    /// # Example
    /// ```
    /// use qaoa_ansatz::{Ansatz, ProblemKind};
    /// use serde_json::json;
    ///
    /// let params = json!({ "Q": [[1, 0], [2, -1]], "config": { "use_barrier": true } });
    /// let ansatz = ProblemKind::Qubo.build(&params).unwrap();
    /// assert_eq!(ansatz.num_qubits(), 2);
    /// assert!(ansatz.config().use_barrier);
    /// ```
    pub fn build(&self, params: &Value) -> Result<Box<dyn Ansatz>> {
        let config = AnsatzConfig::from_params(params)?;
        Ok(match self {
            ProblemKind::MaxCut => Box::new(MaxCut::from_params(params, config)?),
            ProblemKind::ExactCover => Box::new(ExactCover::from_params(params, config)?),
            ProblemKind::Qubo => Box::new(Qubo::from_params(params, config)?),
            ProblemKind::Portfolio => Box::new(Portfolio::from_params(params, config)?),
        })
    }
}

impl FromStr for ProblemKind {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                AnsatzError::invalid_parameter("problem", format!("unknown problem '{}'", s))
            })
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
