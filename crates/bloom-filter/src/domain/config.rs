//! Bloom filter configuration
//!
//! # Example
//!
//! ```
//! use bloom_filter::FilterConfig;
//!
//! let mut filter = FilterConfig::default()
//!     .with_expected_insertions(10_000)
//!     .with_false_positive_probability(0.03)
//!     .build();
//!
//! filter.put(b"apple");
//! assert!(filter.might_contain(b"apple"));
//! assert_eq!(filter.m(), 73024);
//! ```
//!
//! Values are trusted as given; degenerate ones are clamped by
//! [`estimate_parameters`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bloom_filter::BloomFilter;
use super::parameters::{estimate_parameters, FilterParams, DEFAULT_FPP};
use super::strategy::HashStrategy;

/// Sizing configuration for a Bloom filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Expected number of distinct insertions (n)
    pub expected_insertions: usize,
    /// Target false positive probability (p)
    pub false_positive_probability: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_insertions: 1000,
            false_positive_probability: DEFAULT_FPP,
        }
    }
}

impl FilterConfig {
    pub fn new(expected_insertions: usize, false_positive_probability: f64) -> Self {
        Self {
            expected_insertions,
            false_positive_probability,
        }
    }

    /// Builder-style method to set expected insertions
    pub fn with_expected_insertions(mut self, n: usize) -> Self {
        self.expected_insertions = n;
        self
    }

    /// Builder-style method to set the target FPP
    pub fn with_false_positive_probability(mut self, p: f64) -> Self {
        self.false_positive_probability = p;
        self
    }

    /// Parameters a filter built from this config will use
    pub fn params(&self) -> FilterParams {
        estimate_parameters(self.expected_insertions, self.false_positive_probability)
    }

    /// Build an empty filter with the default strategy
    pub fn build(&self) -> BloomFilter {
        BloomFilter::new_with_fpp(self.expected_insertions, self.false_positive_probability)
    }

    /// Build an empty filter with `strategy`
    pub fn build_with_strategy(&self, strategy: Arc<dyn HashStrategy>) -> BloomFilter {
        BloomFilter::new_with_strategy(
            self.expected_insertions,
            self.false_positive_probability,
            strategy,
        )
    }
}
