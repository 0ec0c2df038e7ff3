//! # Bloom Filter
//!
//! Probabilistic set membership over arbitrary byte strings: a fixed-size
//! bit array plus a pluggable hash strategy. A query answers either
//! "definitely absent" or "possibly present".
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `estimate_parameters`: Sizes m and k from n and the target FPP
//!   - `BitArray`: Word-packed bit storage
//!   - `HashStrategy` / `Murmur128Mitz64`: Element to k bit positions
//!   - `BloomFilter`: Insertion, lookup, JSON and binary forms
//!   - `FilterConfig`: Serde-friendly sizing configuration
//!
//! - **Error** (`error`): `FilterError` for decoding and unions
//!
//! ## Invariants
//!
//! - m is a multiple of 64 (at least 64) and k >= 1 for estimated filters
//! - No false negatives: if inserted, `might_contain()` MUST return true
//! - Bits only flip from 0 to 1
//!
//! ## Compatibility
//!
//! The default strategy is bit-compatible with Guava's `MURMUR128_MITZ_64`.
//! A filter must be queried with the strategy that populated it; the
//! serialized form does not record it and deserialization always installs
//! the default.
//!
//! ## Usage Example
//!
//! ```
//! use bloom_filter::BloomFilter;
//!
//! let mut filter = BloomFilter::new_with_fpp(100, 0.01);
//! filter.put(b"this_is_a_test_string").put(b"another");
//!
//! assert!(filter.might_contain(b"this_is_a_test_string"));
//!
//! let json = filter.to_json()?;
//! let restored = BloomFilter::from_json(&json)?;
//! assert!(restored.might_contain(b"another"));
//! # Ok::<(), bloom_filter::FilterError>(())
//! ```
//!
//! ## Concurrency
//!
//! A filter is a plain value. Concurrent readers are fine; writers need
//! external synchronization such as a `RwLock` around the filter.

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{
    default_strategy, estimate_parameters, BitArray, BloomFilter, FilterConfig, FilterParams,
    FilterSnapshot, HashStrategy, Murmur128Mitz64, DEFAULT_FPP,
};
pub use error::FilterError;
