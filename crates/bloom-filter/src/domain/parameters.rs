//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = -n*ln(p) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)         -- optimal hash functions
//! - p = (1 - e^(-kn/m))^k     -- false positive rate for a given load
//!
//! The bit count is padded to whole 64-bit words after `k` is derived.

use std::f64::consts::LN_2;

use tracing::warn;

/// False positive probability used when none is given
pub const DEFAULT_FPP: f64 = 1e-5;

/// Width of a storage word in bits
pub const WORD_BITS: usize = 64;

/// Largest addressable bit count that is a whole number of words
pub const MAX_BITS: usize = usize::MAX & !(WORD_BITS - 1);

/// Bloom filter parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterParams {
    /// Number of bits in the filter (m), always a multiple of 64
    pub size_bits: usize,
    /// Number of hash functions (k), always at least 1
    pub hash_count: usize,
}

impl FilterParams {
    /// Expected false positive rate once `n` elements have been inserted
    pub fn expected_fpp(&self, n: usize) -> f64 {
        false_positive_rate(self.size_bits, n, self.hash_count)
    }
}

/// Estimate `m` and `k` for `n` expected insertions at probability `p`
///
/// Never fails. `n` is clamped to at least 1 and a probability that cannot
/// be inverted (NaN, zero, negative) is replaced by the smallest normal
/// positive float, so the result is always finite. Sizes beyond
/// [`MAX_BITS`] saturate there instead of overflowing.
pub fn estimate_parameters(n: usize, p: f64) -> FilterParams {
    let n = n.max(1) as f64;
    let ln2_squared = LN_2 * LN_2;

    let ln_p = sanitize_probability(p).ln();
    let raw_bits = (-n * ln_p / ln2_squared).ceil();
    let m = if raw_bits > 0.0 { raw_bits as usize } else { 0 };

    let k = ((m as f64 / n) * LN_2).round() as usize;

    FilterParams {
        size_bits: pad_to_word(m),
        hash_count: k.max(1),
    }
}

/// Round `m` up to the next multiple of 64 bits, with a floor of one word
///
/// Saturates at [`MAX_BITS`].
pub fn pad_to_word(m: usize) -> usize {
    let words = m.div_ceil(WORD_BITS).max(1);
    words.checked_mul(WORD_BITS).unwrap_or(MAX_BITS)
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn false_positive_rate(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

fn sanitize_probability(p: f64) -> f64 {
    if p.is_nan() || p <= 0.0 {
        warn!(
            fpp = p,
            clamped = f64::MIN_POSITIVE,
            "False positive probability cannot be inverted, clamping"
        );
        return f64::MIN_POSITIVE;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answer_n1000_p001() {
        let params = estimate_parameters(1000, 0.01);
        assert_eq!(params.size_bits, 9600);
        assert_eq!(params.hash_count, 7);
    }

    #[test]
    fn test_known_answer_n10000_p003() {
        let params = estimate_parameters(10_000, 0.03);
        assert_eq!(params.size_bits, 73024);
        assert_eq!(params.hash_count, 5);
    }

    #[test]
    fn test_known_answer_n1024_p001() {
        let params = estimate_parameters(1024, 0.01);
        assert_eq!(params.size_bits, 9856);
        assert_eq!(params.hash_count, 7);
    }

    #[test]
    fn test_zero_elements_treated_as_one() {
        assert_eq!(estimate_parameters(0, 0.01), estimate_parameters(1, 0.01));
        assert!(estimate_parameters(0, 0.01).size_bits >= WORD_BITS);
    }

    #[test]
    fn test_zero_probability_does_not_crash() {
        let params = estimate_parameters(1, 0.0);
        assert!(params.size_bits > 0, "m must stay positive for p=0");
        assert_eq!(params.size_bits % WORD_BITS, 0);
        assert!(params.hash_count >= 1);
    }

    #[test]
    fn test_negative_and_nan_probability_do_not_crash() {
        for p in [-0.5, f64::NAN, f64::NEG_INFINITY] {
            let params = estimate_parameters(10, p);
            assert!(params.size_bits > 0, "m must stay positive for p={}", p);
            assert!(params.hash_count >= 1, "k must stay positive for p={}", p);
        }
    }

    #[test]
    fn test_probability_of_one_or_more_gives_minimal_filter() {
        for p in [1.0, 2.0, f64::INFINITY] {
            let params = estimate_parameters(100, p);
            assert_eq!(params.size_bits, WORD_BITS, "p={}", p);
            assert_eq!(params.hash_count, 1, "p={}", p);
        }
    }

    #[test]
    fn test_pad_to_word() {
        assert_eq!(pad_to_word(0), 64);
        assert_eq!(pad_to_word(1), 64);
        assert_eq!(pad_to_word(64), 64);
        assert_eq!(pad_to_word(65), 128);
        assert_eq!(pad_to_word(9585), 9600);
        assert_eq!(pad_to_word(MAX_BITS), MAX_BITS);
        assert_eq!(pad_to_word(usize::MAX), MAX_BITS);
    }

    #[test]
    fn test_huge_inputs_saturate_without_overflow() {
        for (n, p) in [(usize::MAX, 0.01), (usize::MAX / 2, 1e-300), (usize::MAX, 0.0)] {
            let params = estimate_parameters(n, p);
            assert_eq!(params.size_bits, MAX_BITS, "n={} p={}", n, p);
            assert_eq!(params.size_bits % WORD_BITS, 0);
            assert!(params.hash_count >= 1, "k must stay positive for n={}", n);
        }
    }

    #[test]
    fn test_fpr_calculation() {
        // With m=1000, n=100, k=7, FPR should be around 0.008
        let fpr = false_positive_rate(1000, 100, 7);
        assert!(fpr > 0.005 && fpr < 0.02, "Expected FPR≈0.008, got {}", fpr);
        assert_eq!(false_positive_rate(0, 10, 3), 1.0);
    }

    #[test]
    fn test_expected_fpp_meets_target() {
        let target = 0.01;
        let params = estimate_parameters(100, target);
        let expected = params.expected_fpp(100);

        assert!(
            expected <= target * 1.1,
            "Expected FPR {} should be <= target {}",
            expected,
            target
        );
    }

    #[test]
    fn test_lower_fpp_needs_more_bits() {
        let loose = estimate_parameters(100, 0.1);
        let tight = estimate_parameters(100, 0.01);

        assert!(
            tight.size_bits > loose.size_bits,
            "Lower FPR should need more bits"
        );
        assert!(tight.hash_count > loose.hash_count);
    }
}
