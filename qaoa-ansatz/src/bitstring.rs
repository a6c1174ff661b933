//! Candidate solutions
//!
//! A bitstring is a fixed-length string of `'0'`/`'1'` characters; character
//! `i` is the value of site `i`.

use crate::{AnsatzError, Result};
use ndarray::Array1;
use std::fmt;
use std::str::FromStr;

/// Largest length accepted by [`Bitstring::all`]
pub const MAX_ENUMERABLE_LEN: usize = 24;

/// A validated candidate solution
///
/// # Example
/// ```
/// use qaoa_ansatz::Bitstring;
///
/// let x = Bitstring::parse("0110", 4).unwrap();
/// assert_eq!(x.hamming_weight(), 2);
/// assert!(x.bit(1));
/// assert!(Bitstring::parse("0110", 3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Parse `s` and check that it has `expected_len` characters
    ///
    /// # Errors
    /// Returns [`AnsatzError::InvalidBitstring`] for characters other than
    /// `'0'`/`'1'` or a length different from `expected_len`
    pub fn parse(s: &str, expected_len: usize) -> Result<Self> {
        let bitstring: Self = s.parse()?;
        if bitstring.len() != expected_len {
            return Err(AnsatzError::invalid_bitstring(
                s,
                format!("expected {} bits, got {}", expected_len, bitstring.len()),
            ));
        }
        Ok(bitstring)
    }

    /// Wrap raw bit values
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Bitstring of length `len` whose site `i` is bit `i` of `index`
    pub fn from_index(index: usize, len: usize) -> Self {
        let bits = (0..len)
            .map(|i| i < usize::BITS as usize && (index >> i) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Enumerate all `2^len` bitstrings of length `len`
    ///
    /// # Errors
    /// Returns error if `len` exceeds [`MAX_ENUMERABLE_LEN`]
    pub fn all(len: usize) -> Result<impl Iterator<Item = Bitstring>> {
        if len > MAX_ENUMERABLE_LEN {
            return Err(AnsatzError::invalid_parameter(
                "len",
                format!(
                    "cannot enumerate 2^{} bitstrings (limit is 2^{})",
                    len, MAX_ENUMERABLE_LEN
                ),
            ));
        }
        Ok((0..(1usize << len)).map(move |index| Self::from_index(index, len)))
    }

    /// Number of sites
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the bitstring has no sites
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Value of site `i`
    ///
    /// # Panics
    /// Panics if `i` is out of range
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Bit values in site order
    #[inline]
    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// The 0/1 vector `x`
    pub fn to_vector(&self) -> Array1<f64> {
        self.bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect()
    }

    /// Number of ones
    pub fn hamming_weight(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl FromStr for Bitstring {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(AnsatzError::invalid_bitstring(
                    s,
                    format!("unexpected character '{}'", other),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let x = Bitstring::parse("101", 3).unwrap();
        assert_eq!(x.as_bits(), &[true, false, true]);
        assert_eq!(x.to_vector().to_vec(), vec![1.0, 0.0, 1.0]);
        assert_eq!(x.to_string(), "101");
    }

    #[test]
    fn test_parse_rejects_bad_characters() {
        let err = Bitstring::parse("10a", 3).unwrap_err();
        assert!(matches!(err, AnsatzError::InvalidBitstring { .. }));
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            Bitstring::parse("1011", 3),
            Err(AnsatzError::InvalidBitstring { .. })
        ));
    }

    #[test]
    fn test_from_index_site_order() {
        let x = Bitstring::from_index(0b110, 3);
        assert_eq!(x.to_string(), "011");
    }

    #[test]
    fn test_all_enumerates_every_bitstring_once() {
        let all: Vec<_> = Bitstring::all(3).unwrap().collect();
        assert_eq!(all.len(), 8);
        let unique: std::collections::HashSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), 8);
        assert!(Bitstring::all(MAX_ENUMERABLE_LEN + 1).is_err());
    }

    #[test]
    fn test_hamming_weight() {
        assert_eq!(Bitstring::parse("0000", 4).unwrap().hamming_weight(), 0);
        assert_eq!(Bitstring::parse("1101", 4).unwrap().hamming_weight(), 3);
    }
}
