//! Encoder configuration

use crate::{AnsatzError, Result};
use qaoa_core::Parameter;
use serde::Deserialize;
use std::sync::Arc;

/// Magnitude at or below which a derived value counts as zero
///
/// One policy for three contexts: skipping near-zero Hamiltonian
/// coefficients, the exact-cover feasibility check, and the portfolio budget
/// check.
pub const COEFFICIENT_TOLERANCE: f64 = 1e-7;

/// Default name of the phase (cost) parameter
pub const DEFAULT_PHASE_PARAMETER: &str = "x_gamma";

/// Default name of the mixer parameter
pub const DEFAULT_MIXER_PARAMETER: &str = "x_beta";

/// Configuration shared by all encoders
///
/// Can be read from the `"config"` key of a parameter mapping; absent
/// fields take their defaults and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnsatzConfig {
    /// Append barriers between scheduling blocks
    ///
    /// Default: false
    pub use_barrier: bool,

    /// Zero tolerance for coefficients and feasibility checks
    ///
    /// Default: [`COEFFICIENT_TOLERANCE`]
    pub tolerance: f64,

    /// Name of the phase parameter
    ///
    /// Default: `x_gamma`
    pub phase_parameter: String,

    /// Name of the mixer parameter
    ///
    /// Default: `x_beta`
    pub mixer_parameter: String,
}

impl Default for AnsatzConfig {
    fn default() -> Self {
        Self {
            use_barrier: false,
            tolerance: COEFFICIENT_TOLERANCE,
            phase_parameter: DEFAULT_PHASE_PARAMETER.to_string(),
            mixer_parameter: DEFAULT_MIXER_PARAMETER.to_string(),
        }
    }
}

impl AnsatzConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with barriers enabled
    pub fn with_barriers() -> Self {
        Self {
            use_barrier: true,
            ..Default::default()
        }
    }

    /// Read the optional `"config"` entry of a parameter mapping
    ///
    /// # Errors
    /// Returns error if the entry is malformed or fails validation
    pub fn from_params(params: &serde_json::Value) -> Result<Self> {
        let config = match params.get("config") {
            Some(value) => Self::deserialize(value)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable barriers
    pub fn with_barrier(mut self, enabled: bool) -> Self {
        self.use_barrier = enabled;
        self
    }

    /// Set the zero tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the phase and mixer parameter names
    pub fn with_parameter_names(
        mut self,
        phase: impl Into<String>,
        mixer: impl Into<String>,
    ) -> Self {
        self.phase_parameter = phase.into();
        self.mixer_parameter = mixer.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(AnsatzError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }

        if self.phase_parameter.is_empty() || self.mixer_parameter.is_empty() {
            return Err(AnsatzError::InvalidConfig(
                "parameter names must not be empty".to_string(),
            ));
        }

        if self.phase_parameter == self.mixer_parameter {
            return Err(AnsatzError::InvalidConfig(format!(
                "phase and mixer parameters must differ, both are '{}'",
                self.phase_parameter
            )));
        }

        Ok(())
    }

    /// Whether `value` is treated as exactly zero
    #[inline]
    pub fn is_negligible(&self, value: f64) -> bool {
        value.abs() <= self.tolerance
    }

    /// Fresh phase parameter
    pub fn phase_param(&self) -> Arc<Parameter> {
        Arc::new(Parameter::phase(self.phase_parameter.clone()))
    }

    /// Fresh mixer parameter
    pub fn mixer_param(&self) -> Arc<Parameter> {
        Arc::new(Parameter::mixer(self.mixer_parameter.clone()))
    }
}
