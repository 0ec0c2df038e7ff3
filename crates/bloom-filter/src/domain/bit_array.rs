//! Word-packed bit storage
//!
//! Bit `i` lives in word `i / 64` at position `i % 64`, least significant
//! bit first, so the exported words can be handed to any implementation
//! using the same layout.

use bitvec::prelude::*;

use super::parameters::WORD_BITS;

/// Fixed-size bit array backed by 64-bit words
///
/// Bits only ever flip from 0 to 1; there is no clear or resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u64, Lsb0>,
}

impl BitArray {
    /// Create an all-zero array holding at least `len` bits
    ///
    /// The length is rounded up to whole words.
    pub fn with_len(len: usize) -> Self {
        let words = len.div_ceil(WORD_BITS);
        Self::from_words(vec![0; words])
    }

    /// Rebuild an array from its word representation
    pub fn from_words(words: Vec<u64>) -> Self {
        Self {
            bits: BitVec::from_vec(words),
        }
    }

    /// Set bit `index` to 1
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize) {
        self.bits.set(index, true);
    }

    /// Test bit `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn test(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Number of addressable bits (a multiple of 64)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of bits set to 1
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Borrow the underlying words
    pub fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    /// Copy the underlying words out
    pub fn to_words(&self) -> Vec<u64> {
        self.words().to_vec()
    }

    /// OR `other` into this array word by word
    ///
    /// Words beyond the shorter of the two arrays are left alone.
    pub fn union_with(&mut self, other: &BitArray) {
        let self_raw = self.bits.as_raw_mut_slice();
        for (s, o) in self_raw.iter_mut().zip(other.words()) {
            *s |= *o;
        }
    }
}
