//! Chi-square pair-of-values test.
//!
//! LSB embedding flips samples between the two members of each value pair
//! `(2k, 2k + 1)`, pulling the even/odd split of every pair toward equal
//! frequency. The test compares the observed counts against that 50/50
//! expectation; a small p-value means the split is far from equal.

use serde::Serialize;

use crate::analysis::special;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: i64,
}

/// Run the pair test over flat channel samples.
pub fn chi_square_test(samples: &[u8]) -> ChiSquareResult {
    let mut histogram = [0u64; 256];
    for &value in samples {
        histogram[value as usize] += 1;
    }

    let mut statistic = 0.0;
    let mut included: i64 = 0;

    for pair in histogram.chunks_exact(2) {
        let expected = (pair[0] + pair[1]) as f64 / 2.0;
        if expected <= 0.0 {
            continue;
        }
        for &observed in pair {
            let diff = observed as f64 - expected;
            statistic += diff * diff / expected;
            included += 1;
        }
    }

    let degrees_of_freedom = included - 1;
    let p_value = if degrees_of_freedom > 0 {
        special::chi_square_sf(statistic, degrees_of_freedom as f64)
    } else {
        1.0
    };

    ChiSquareResult {
        statistic,
        p_value,
        degrees_of_freedom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_pairs_score_zero() {
        let samples: Vec<u8> = (0..=255u8).cycle().take(256 * 10).collect();
        let result = chi_square_test(&samples);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.degrees_of_freedom, 255);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_concentrates_on_one_pair() {
        let samples = vec![100u8; 400];
        let result = chi_square_test(&samples);
        // Pair (100, 101): observed 400/0, expected 200/200
        assert_eq!(result.degrees_of_freedom, 1);
        assert!((result.statistic - 400.0).abs() < 1e-9);
        assert!(result.p_value < 1e-50);
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        let result = chi_square_test(&[]);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.degrees_of_freedom, -1);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_known_statistic() {
        // Pair (0,1): 30/10 -> expected 20 each -> 5 + 5
        // Pair (4,5): 5/5 -> 0
        let mut samples = vec![0u8; 30];
        samples.extend(vec![1u8; 10]);
        samples.extend(vec![4u8; 5]);
        samples.extend(vec![5u8; 5]);
        let result = chi_square_test(&samples);
        assert!((result.statistic - 10.0).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 3);
        assert!((result.p_value - special::chi_square_sf(10.0, 3.0)).abs() < 1e-15);
    }
}
