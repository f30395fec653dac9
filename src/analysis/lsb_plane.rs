//! Statistics of the LSB plane: mean, variance, entropy and the runs test.
//!
//! Under a random LSB plane (what a full-capacity embedding produces) the
//! mean sits near 0.5, the variance near 0.25 and the entropy near 1 bit.

use serde::Serialize;

use crate::analysis::special;

pub const EXPECTED_MEAN: f64 = 0.5;
pub const EXPECTED_VARIANCE: f64 = 0.25;

/// Added inside the logarithm so that `log2(0)` never occurs.
const ENTROPY_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunsTestResult {
    pub runs: u64,
    pub ones: u64,
    pub zeros: u64,
    /// `None` when the test is degenerate (single symbol or non-positive variance).
    pub z_score: Option<f64>,
    pub p_value: f64,
}

impl RunsTestResult {
    pub fn is_degenerate(&self) -> bool {
        self.z_score.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LsbPlaneStats {
    pub mean: f64,
    pub variance: f64,
    pub entropy: f64,
    pub runs_test: RunsTestResult,
    pub expected_mean: f64,
    pub expected_variance: f64,
}

/// Reduce samples to their LSB plane and compute every plane statistic.
pub fn lsb_plane_stats(samples: &[u8]) -> LsbPlaneStats {
    let bits: Vec<u8> = samples.iter().map(|&v| v & 1).collect();
    let (mean, variance) = mean_and_variance(&bits);

    LsbPlaneStats {
        mean,
        variance,
        entropy: binary_entropy(&bits),
        runs_test: runs_test(&bits),
        expected_mean: EXPECTED_MEAN,
        expected_variance: EXPECTED_VARIANCE,
    }
}

/// Population mean and variance of a bit plane. Empty input yields zeros.
fn mean_and_variance(bits: &[u8]) -> (f64, f64) {
    if bits.is_empty() {
        return (0.0, 0.0);
    }
    let n = bits.len() as f64;
    let ones: u64 = bits.iter().map(|&b| b as u64).sum();
    let mean = ones as f64 / n;
    let squares: f64 = bits
        .iter()
        .map(|&b| {
            let d = b as f64 - mean;
            d * d
        })
        .sum();
    (mean, squares / n)
}

/// Shannon entropy in bits over the symbols actually present.
pub fn binary_entropy(bits: &[u8]) -> f64 {
    if bits.is_empty() {
        return 0.0;
    }
    let n = bits.len() as f64;
    let ones = bits.iter().filter(|&&b| b != 0).count() as f64;
    let entropy: f64 = [n - ones, ones]
        .iter()
        .filter(|&&count| count > 0.0)
        .map(|&count| {
            let p = count / n;
            -p * (p + ENTROPY_EPSILON).log2()
        })
        .sum();
    // A single-symbol plane would otherwise come out as a tiny negative
    entropy.max(0.0)
}

/// Wald-Wolfowitz runs test on a binary sequence.
pub fn runs_test(bits: &[u8]) -> RunsTestResult {
    let ones = bits.iter().filter(|&&b| b != 0).count() as u64;
    let zeros = bits.len() as u64 - ones;
    let runs = if bits.is_empty() {
        0
    } else {
        1 + bits.windows(2).filter(|w| w[0] != w[1]).count() as u64
    };

    let degenerate = RunsTestResult {
        runs,
        ones,
        zeros,
        z_score: None,
        p_value: 1.0,
    };
    if ones == 0 || zeros == 0 {
        return degenerate;
    }

    let n = bits.len() as f64;
    let n1 = ones as f64;
    let n0 = zeros as f64;
    let product = 2.0 * n1 * n0;
    let expected = product / n + 1.0;
    let variance = product * (product - n) / (n * n * (n - 1.0));
    if variance <= 0.0 {
        return degenerate;
    }

    let z = (runs as f64 - expected) / variance.sqrt();
    RunsTestResult {
        z_score: Some(z),
        p_value: special::normal_two_tailed_p(z),
        ..degenerate
    }
}
