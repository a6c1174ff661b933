//! Symbolic parameters for variational operator sequences
//!
//! A [`Parameter`] is a named placeholder for an angle. It carries no value:
//! an external driver binds numbers to parameter names when it executes a
//! sequence. Operations reference a parameter through a shared
//! `Arc<Parameter>`, so every operation of a phase (or mixer) layer points at
//! the same instance.

use std::fmt;

/// Which half of a QAOA layer a parameter drives
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    /// Cost (phase) operator angle, conventionally gamma
    Phase,
    /// Mixer operator angle, conventionally beta
    Mixer,
}

impl ParameterRole {
    /// Lower-case tag used in serialized forms
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterRole::Phase => "phase",
            ParameterRole::Mixer => "mixer",
        }
    }

    /// Parse a role tag produced by [`ParameterRole::as_str`]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "phase" => Some(ParameterRole::Phase),
            "mixer" => Some(ParameterRole::Mixer),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, unbound circuit parameter
///
/// # Example
/// ```
/// use qaoa_core::{Parameter, ParameterRole};
///
/// let gamma = Parameter::phase("x_gamma");
/// assert_eq!(gamma.name(), "x_gamma");
/// assert_eq!(gamma.role(), ParameterRole::Phase);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
    role: ParameterRole,
}

impl Parameter {
    /// Create a parameter with an explicit role
    pub fn new(name: impl Into<String>, role: ParameterRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Create a phase (cost) parameter
    pub fn phase(name: impl Into<String>) -> Self {
        Self::new(name, ParameterRole::Phase)
    }

    /// Create a mixer parameter
    pub fn mixer(name: impl Into<String>) -> Self {
        Self::new(name, ParameterRole::Mixer)
    }

    /// Parameter name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter role
    #[inline]
    pub fn role(&self) -> ParameterRole {
        self.role
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
