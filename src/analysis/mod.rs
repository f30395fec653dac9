//! # Statistical Steganalysis
//!
//! Four independent estimators computed from one pixel channel, plus the
//! scorer that folds them into a single suspicion value.
//!
//! ## Modules
//!
//! - [`chi_square`]: pair-of-values goodness-of-fit test
//! - [`lsb_plane`]: mean, variance, entropy and runs test of the LSB plane
//! - [`correlation`]: horizontal and vertical neighbour correlation
//! - [`scorer`]: weighted indicators combined into a `[0, 1]` score
//! - [`special`]: incomplete gamma and error functions for the p-values

pub mod chi_square;
pub mod correlation;
pub mod lsb_plane;
pub mod scorer;
pub mod special;

use serde::Serialize;

use crate::processing::channel::PixelChannel;

pub use chi_square::{chi_square_test, ChiSquareResult};
pub use correlation::{spatial_correlation, SpatialCorrelation};
pub use lsb_plane::{lsb_plane_stats, LsbPlaneStats, RunsTestResult};
pub use scorer::{ScoreInputs, SuspicionScore, SuspicionScorer};

/// Results of the full test battery on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryResults {
    pub chi_square: ChiSquareResult,
    pub lsb_plane: LsbPlaneStats,
    pub correlation: SpatialCorrelation,
}

impl BatteryResults {
    pub fn score_inputs(&self) -> ScoreInputs<'_> {
        ScoreInputs {
            chi_square_p_value: self.chi_square.p_value,
            lsb_plane: &self.lsb_plane,
            correlation: &self.correlation,
        }
    }
}

/// Run every test on `channel`.
pub fn run_battery(channel: &PixelChannel) -> BatteryResults {
    let samples = channel.samples();
    BatteryResults {
        chi_square: chi_square_test(samples),
        lsb_plane: lsb_plane_stats(samples),
        correlation: spatial_correlation(channel),
    }
}
