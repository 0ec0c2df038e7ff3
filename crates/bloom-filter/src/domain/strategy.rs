//! Hash strategies mapping an element to k bit positions
//!
//! A filter is only meaningful when queried with the same strategy that
//! populated it. Nothing in the bit layout records which one was used.

use std::fmt::Debug;
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

/// Translates a byte string into `k` bit indexes in `[0, m)`
pub trait HashStrategy: Debug + Send + Sync {
    /// Compute the `k` bit indexes for `data` in a filter of `m` bits
    fn indexes(&self, data: &[u8], m: usize, k: usize) -> Vec<usize>;

    /// Identifier used when checking filters for compatibility
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// MurmurHash3 x64 128-bit with Kirsch-Mitzenmacher double hashing
///
/// Bit-compatible with Guava's `MURMUR128_MITZ_64` Bloom filter strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur128Mitz64;

impl Murmur128Mitz64 {
    pub const NAME: &'static str = "MURMUR128_MITZ_64";
}

impl HashStrategy for Murmur128Mitz64 {
    fn indexes(&self, data: &[u8], m: usize, k: usize) -> Vec<usize> {
        let (h1, h2) = murmur3_x64_128(data);
        let m = m as u64;

        // Masking keeps the value non-negative even when `combined` is i64::MIN
        let mut combined = h1;
        let mut indexes = Vec::with_capacity(k);
        for _ in 0..k {
            indexes.push(((combined & i64::MAX as u64) % m) as usize);
            combined = combined.wrapping_add(h2);
        }
        indexes
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Shared instance of the default strategy
pub fn default_strategy() -> Arc<dyn HashStrategy> {
    static DEFAULT: OnceLock<Arc<dyn HashStrategy>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(Murmur128Mitz64)).clone()
}

/// Split the 128-bit MurmurHash3 of `data` (seed 0) into its two halves
fn murmur3_x64_128(data: &[u8]) -> (u64, u64) {
    let mut cursor = Cursor::new(data);

    // Reading from an in-memory slice cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, 0).unwrap_or(0);
    (hash as u64, (hash >> 64) as u64)
}
