//! Domain Layer - Pure data-structure logic
//!
//! This layer contains:
//! - Parameter estimation
//! - Word-packed bit storage
//! - Hash strategies
//! - Core Bloom filter and its serialized forms
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No internal synchronization; wrap a filter in a lock to share writers

pub mod bit_array;
pub mod bloom_filter;
pub mod config;
pub mod parameters;
pub mod strategy;

pub use bit_array::BitArray;
pub use bloom_filter::{BloomFilter, FilterSnapshot};
pub use config::FilterConfig;
pub use parameters::{
    estimate_parameters, false_positive_rate, pad_to_word, FilterParams, DEFAULT_FPP, MAX_BITS,
    WORD_BITS,
};
pub use strategy::{default_strategy, HashStrategy, Murmur128Mitz64};
