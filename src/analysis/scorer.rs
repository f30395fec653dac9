//! # Suspicion Scoring
//!
//! Folds the test battery into a single score in `[0, 1]`. The score is a
//! sum of fixed weights, one per indicator whose threshold is crossed:
//!
//! | Indicator        | Condition                               | Weight |
//! |------------------|-----------------------------------------|--------|
//! | Chi-square       | p-value < 0.01                          | 0.4    |
//! | Mean deviation   | \|LSB mean - 0.5\| > 0.1                | 0.2    |
//! | High entropy     | LSB entropy > 0.99                      | 0.2    |
//! | Low correlation  | (\|h\| + \|v\|) / 2 < 0.8               | 0.2    |
//!
//! The sum is capped at 1.0. [`SuspicionScorer::default`] carries exactly
//! these constants; a scorer never changes after construction.

use serde::{Deserialize, Serialize};

use crate::analysis::correlation::SpatialCorrelation;
use crate::analysis::lsb_plane::{LsbPlaneStats, EXPECTED_MEAN};

/// Weight contributed by each indicator when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWeights {
    pub chi_square: f64,
    pub mean_deviation: f64,
    pub entropy: f64,
    pub correlation: f64,
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        Self {
            chi_square: 0.4,
            mean_deviation: 0.2,
            entropy: 0.2,
            correlation: 0.2,
        }
    }
}

/// Threshold each indicator is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorThresholds {
    /// Chi-square fires when its p-value is below this.
    pub chi_square_p_value: f64,
    /// Mean deviation fires when `|mean - 0.5|` is above this.
    pub mean_deviation: f64,
    /// Entropy fires when the LSB entropy is above this.
    pub entropy: f64,
    /// Correlation fires when the mean absolute correlation is below this.
    pub correlation: f64,
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            chi_square_p_value: 0.01,
            mean_deviation: 0.1,
            entropy: 0.99,
            correlation: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    ChiSquare,
    MeanDeviation,
    Entropy,
    Correlation,
}

/// Outcome of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    pub kind: IndicatorKind,
    /// The value compared against the threshold.
    pub value: f64,
    pub threshold: f64,
    pub triggered: bool,
    /// Weight added to the score, 0 when not triggered.
    pub contribution: f64,
}

/// Statistics the scorer consumes.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub chi_square_p_value: f64,
    pub lsb_plane: &'a LsbPlaneStats,
    pub correlation: &'a SpatialCorrelation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspicionScore {
    pub score: f64,
    pub indicators: Vec<Indicator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspicionScorer {
    weights: IndicatorWeights,
    thresholds: IndicatorThresholds,
}

impl SuspicionScorer {
    pub fn new(weights: IndicatorWeights, thresholds: IndicatorThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> &IndicatorWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &IndicatorThresholds {
        &self.thresholds
    }

    pub fn score(&self, inputs: &ScoreInputs<'_>) -> SuspicionScore {
        let w = &self.weights;
        let t = &self.thresholds;

        let mean_deviation = (inputs.lsb_plane.mean - EXPECTED_MEAN).abs();
        let avg_correlation = inputs.correlation.average_magnitude();

        let indicators = vec![
            indicator(
                IndicatorKind::ChiSquare,
                inputs.chi_square_p_value,
                t.chi_square_p_value,
                inputs.chi_square_p_value < t.chi_square_p_value,
                w.chi_square,
            ),
            indicator(
                IndicatorKind::MeanDeviation,
                mean_deviation,
                t.mean_deviation,
                mean_deviation > t.mean_deviation,
                w.mean_deviation,
            ),
            indicator(
                IndicatorKind::Entropy,
                inputs.lsb_plane.entropy,
                t.entropy,
                inputs.lsb_plane.entropy > t.entropy,
                w.entropy,
            ),
            indicator(
                IndicatorKind::Correlation,
                avg_correlation,
                t.correlation,
                avg_correlation < t.correlation,
                w.correlation,
            ),
        ];

        let total: f64 = indicators.iter().map(|i| i.contribution).sum();
        SuspicionScore {
            score: total.clamp(0.0, 1.0),
            indicators,
        }
    }
}

fn indicator(kind: IndicatorKind, value: f64, threshold: f64, triggered: bool, weight: f64) -> Indicator {
    Indicator {
        kind,
        value,
        threshold,
        triggered,
        contribution: if triggered { weight } else { 0.0 },
    }
}
