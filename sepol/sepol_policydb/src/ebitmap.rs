//! Sparse bitmap over small integers.
//!
//! Datums refer to other symbols through bitmaps whose bit `n` stands for
//! the symbol with value `n + 1`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A sparse set of small integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ebitmap {
    bits: BTreeSet<u32>,
}

impl Ebitmap {
    /// Create an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a bit.
    pub fn set_bit(&mut self, bit: u32, value: bool) {
        if value {
            self.bits.insert(bit);
        } else {
            self.bits.remove(&bit);
        }
    }

    /// Set a bit.
    pub fn set(&mut self, bit: u32) {
        self.set_bit(bit, true);
    }

    /// Whether a bit is set.
    pub fn get(&self, bit: u32) -> bool {
        self.bits.contains(&bit)
    }

    /// Iterate over the set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.bits.iter().copied()
    }

    /// Number of set bits.
    pub fn cardinality(&self) -> usize {
        self.bits.len()
    }

    /// Whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.bits.clear();
    }
}

impl FromIterator<u32> for Ebitmap {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
