//! Qubit addressing and registers

use crate::{QuantumError, Result};
use std::fmt;

/// Type-safe index of a site in a register
///
/// # Example
/// ```
/// use qaoa_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// assert_eq!(q1.index(), 1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

/// An ordered set of `N` addressable binary-state sites
///
/// A register carries identity only: its size. Every operator sequence
/// produced for a problem instance is built over a register of the
/// instance's size.
///
/// # Example
/// ```
/// use qaoa_core::QuantumRegister;
///
/// let register = QuantumRegister::new(3).unwrap();
/// assert_eq!(register.size(), 3);
/// assert_eq!(register.qubits().count(), 3);
/// assert!(QuantumRegister::new(0).is_err());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct QuantumRegister {
    size: usize,
}

impl QuantumRegister {
    /// Create a register of `size` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyRegister`] if `size` is 0
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(QuantumError::EmptyRegister);
        }
        Ok(Self { size })
    }

    /// Number of qubits in the register
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Get the qubit at `index`
    ///
    /// # Errors
    /// Returns error if `index` is outside the register
    pub fn qubit(&self, index: usize) -> Result<QubitId> {
        if index >= self.size {
            return Err(QuantumError::invalid_qubit(index, self.size));
        }
        Ok(QubitId::new(index))
    }

    /// Iterate over all qubits in site order
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> {
        (0..self.size).map(QubitId::new)
    }

    /// Whether `qubit` addresses a site of this register
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        qubit.index() < self.size
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuantumRegister({})", self.size)
    }
}
