//! Core Bloom filter implementation
//!
//! Cheat sheet:
//! - m: total bits
//! - n: expected insertions
//! - p: expected false positive probability
//! - k: number of hash functions
//!
//! INVARIANTS:
//! - m is a multiple of 64 and k >= 1 for every estimated filter
//! - No false negatives: if inserted, might_contain() MUST return true

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bit_array::BitArray;
use super::parameters::{estimate_parameters, DEFAULT_FPP, WORD_BITS};
use super::strategy::{default_strategy, HashStrategy};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// Serializes as `{"m": .., "k": .., "bits": [..]}`. The strategy is not
/// part of the serialized form: deserializing always installs the default
/// strategy, use [`BloomFilter::set_strategy`] afterwards if the filter was
/// built with another one.
///
/// `m` and `k` are taken from the payload without validation. An `m` larger
/// than `64 * bits.len()` panics on the first out-of-range bit access, and
/// a `k` too large to allocate aborts on the first `put`/`might_contain`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BloomFilter {
    /// Size in bits (m)
    m: usize,
    /// Number of hash functions (k)
    k: usize,
    /// Bit array storing the filter state
    #[serde(with = "bit_array_serde")]
    bits: BitArray,
    /// Maps elements to bit positions
    #[serde(skip, default = "default_strategy")]
    strategy: Arc<dyn HashStrategy>,
}

/// Serde support for BitArray as a plain list of words
mod bit_array_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::bit_array::BitArray;

    pub fn serialize<S>(bits: &BitArray, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bits.words().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitArray, D::Error>
    where
        D: Deserializer<'de>,
    {
        let words: Vec<u64> = Deserialize::deserialize(deserializer)?;
        Ok(BitArray::from_words(words))
    }
}

/// Raw fields of a serialized filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub m: usize,
    pub k: usize,
    pub bits: Vec<u64>,
}

impl From<&BloomFilter> for FilterSnapshot {
    fn from(filter: &BloomFilter) -> Self {
        Self {
            m: filter.m,
            k: filter.k,
            bits: filter.bits(),
        }
    }
}

impl BloomFilter {
    /// Create a filter for `n` expected insertions at the default FPP (1e-5)
    pub fn new(n: usize) -> Self {
        Self::new_with_fpp(n, DEFAULT_FPP)
    }

    /// Create a filter for `n` expected insertions at false positive probability `p`
    pub fn new_with_fpp(n: usize, p: f64) -> Self {
        Self::new_with_strategy(n, p, default_strategy())
    }

    /// Create a filter with an explicit hash strategy
    pub fn new_with_strategy(n: usize, p: f64, strategy: Arc<dyn HashStrategy>) -> Self {
        let params = estimate_parameters(n, p);
        debug!(
            expected_insertions = n,
            fpp = p,
            m = params.size_bits,
            k = params.hash_count,
            strategy = strategy.name(),
            "Creating bloom filter"
        );
        Self {
            m: params.size_bits,
            k: params.hash_count,
            bits: BitArray::with_len(params.size_bits),
            strategy,
        }
    }

    /// Rebuild a filter from its words and hash count using the default strategy
    ///
    /// `m` becomes `64 * words.len()`. An empty word list is treated as a
    /// single zero word so the filter stays addressable.
    pub fn from_words(words: Vec<u64>, k: usize) -> Self {
        Self::from_words_with_strategy(words, k, default_strategy())
    }

    /// Rebuild a filter from its words with the strategy that produced them
    pub fn from_words_with_strategy(
        mut words: Vec<u64>,
        k: usize,
        strategy: Arc<dyn HashStrategy>,
    ) -> Self {
        if words.is_empty() {
            words.push(0);
        }
        let m = words.len() * WORD_BITS;
        debug!(m, k, strategy = strategy.name(), "Restoring bloom filter");
        Self {
            m,
            k,
            bits: BitArray::from_words(words),
            strategy,
        }
    }

    /// Insert an element into the filter
    ///
    /// Returns the filter so insertions can be chained.
    pub fn put(&mut self, data: &[u8]) -> &mut Self {
        for index in self.strategy.indexes(data, self.m, self.k) {
            self.bits.set(index);
        }
        self
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set (never false negative)
    pub fn might_contain(&self, data: &[u8]) -> bool {
        self.strategy
            .indexes(data, self.m, self.k)
            .into_iter()
            .all(|index| self.bits.test(index))
    }

    /// Merge another filter into this one (OR operation)
    ///
    /// Both filters must share m, k and strategy; otherwise nothing changes.
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        if !self.is_compatible(other) {
            warn!(
                m = self.m,
                k = self.k,
                other_m = other.m,
                other_k = other.k,
                "Refusing to union incompatible bloom filters"
            );
            return Err(FilterError::IncompatibleFilters {
                m: self.m,
                k: self.k,
                strategy: self.strategy.name().to_string(),
                other_m: other.m,
                other_k: other.k,
                other_strategy: other.strategy.name().to_string(),
            });
        }
        self.bits.union_with(&other.bits);
        Ok(())
    }

    /// Whether `other` can be merged into this filter
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.m == other.m && self.k == other.k && self.strategy.name() == other.strategy.name()
    }

    /// Get the filter size in bits
    pub fn m(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn k(&self) -> usize {
        self.k
    }

    /// Snapshot of the bit array as 64-bit words
    pub fn bits(&self) -> Vec<u64> {
        self.bits.to_words()
    }

    pub fn strategy(&self) -> &Arc<dyn HashStrategy> {
        &self.strategy
    }

    /// Replace the strategy, e.g. after deserializing a filter built with a
    /// non-default one. Has no effect on the stored bits.
    pub fn set_strategy(&mut self, strategy: Arc<dyn HashStrategy>) {
        self.strategy = strategy;
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// True if nothing has been inserted yet
    pub fn is_empty(&self) -> bool {
        self.bits_set() == 0
    }

    /// Fraction of bits set
    pub fn load_factor(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.bits_set() as f64 / self.bits.len() as f64
    }

    /// Current false positive probability estimated from the fill ratio
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(self.k as i32)
    }

    /// Serialize the filter to its JSON form
    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a filter from its JSON form (default strategy)
    ///
    /// `m` and `k` are trusted as given; an oversized `m` or `k` is only
    /// detected when the filter is used (panic or allocation abort).
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the filter to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a filter from bytes (default strategy)
    ///
    /// `m` and `k` are trusted as given; an oversized `m` or `k` is only
    /// detected when the filter is used (panic or allocation abort).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
