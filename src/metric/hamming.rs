//! Fixed-width bit-vector keys and the Hamming metric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Metric;
use crate::error::{Result, VantageError};

/// A fixed-width 128-bit key.
///
/// Parsed from a decimal string; rendered as a 128-character binary string,
/// most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitKey128(pub u128);

impl BitKey128 {
    /// Create a key from its raw bits.
    pub fn new(bits: u128) -> Self {
        BitKey128(bits)
    }

    /// The raw bits.
    pub fn bits(&self) -> u128 {
        self.0
    }

    /// Hamming distance to another key: the number of differing bit
    /// positions, i.e. the population count of the XOR.
    pub fn hamming_distance(&self, other: &BitKey128) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl FromStr for BitKey128 {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .trim()
            .parse::<u128>()
            .map_err(|e| VantageError::key(format!("invalid 128-bit key {s:?}: {e}")))?;
        Ok(BitKey128(bits))
    }
}

impl fmt::Display for BitKey128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0128b}", self.0)
    }
}

/// Hamming distance metric over [`BitKey128`] keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming;

impl Metric<BitKey128> for Hamming {
    fn distance(&self, a: &BitKey128, b: &BitKey128) -> f64 {
        a.hamming_distance(b) as f64
    }
}
