//! Core types for QDemo
//!
//! Type aliases and the `Bitstring` wrapper shared by the circuit
//! builders and the simulator.

use crate::error::{QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
pub type QubitId = usize;

/// Classical bit identifier (0-indexed)
pub type ClbitId = usize;

/// Measurement counts: bitstring -> count
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Bitstring
// ============================================================================

/// Bitstring in written order: index 0 is the leading (most significant) bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    pub fn parse(s: &str) -> QdemoResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QdemoError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Binary representation of a non-negative integer without leading zeros.
    ///
    /// Zero is written as a single `0` bit.
    pub fn from_value(value: u64) -> Self {
        if value == 0 {
            return Self::zeros(1);
        }
        let width = (u64::BITS - value.leading_zeros()) as usize;
        let bits = (0..width)
            .rev()
            .map(|shift| (value >> shift) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Create zero bitstring of given length
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Zero-pad on the leading (high) end up to `width` bits.
    ///
    /// Returns a copy unchanged when already at least `width` long.
    pub fn padded(&self, width: usize) -> Self {
        let pad = width.saturating_sub(self.bits.len());
        let mut bits = vec![false; pad];
        bits.extend_from_slice(&self.bits);
        Self { bits }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Count number of 1s (Hamming weight)
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Get bit at index in written order
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterate bits in written order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Indices of the set bits, in written order
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| i)
    }

    /// Convert back to an integer (for bitstrings up to 64 bits)
    pub fn to_u64(&self) -> u64 {
        self.bits
            .iter()
            .fold(0u64, |acc, &b| (acc << 1) | u64::from(b))
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_parse() {
        let bs = Bitstring::parse("01101").unwrap();
        assert_eq!(bs.len(), 5);
        assert_eq!(bs.popcount(), 3);
        assert!(Bitstring::parse("012").is_err());
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Bitstring::from_value(0).to_string(), "0");
        assert_eq!(Bitstring::from_value(5).to_string(), "101");
        assert_eq!(Bitstring::from_value(72).to_string(), "1001000");
        assert_eq!(Bitstring::from_value(u64::MAX).len(), 64);
    }

    #[test]
    fn test_padded() {
        let bs = Bitstring::from_value(3).padded(5);
        assert_eq!(bs.to_string(), "00011");
        assert_eq!(bs.to_u64(), 3);

        // Never truncates
        assert_eq!(Bitstring::from_value(6).padded(1).to_string(), "110");
    }

    #[test]
    fn test_ones() {
        let bs = Bitstring::parse("1010").unwrap();
        let ones: Vec<usize> = bs.ones().collect();
        assert_eq!(ones, vec![0, 2]);
    }

    #[test]
    fn test_value_roundtrip() {
        for value in [0u64, 1, 2, 7, 50, 60, 72, 1023] {
            assert_eq!(Bitstring::from_value(value).to_u64(), value);
        }
    }
}
