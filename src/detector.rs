//! # LSB Detector
//!
//! Runs the complete analysis of one pixel channel:
//!
//! 1. Try to extract and decode a hidden message
//! 2. Run the statistical test battery, whatever step 1 found
//! 3. Fold the battery into a suspicion score
//! 4. Classify: a readable message means steganography was detected;
//!    otherwise a score above [`SUSPICIOUS_THRESHOLD`] is suspicious
//!
//! The detector holds only its (immutable) scorer, so one instance can
//! analyze any number of channels.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lsb_detector::detector::LsbDetector;
//!
//! let detector = LsbDetector::new();
//! let verdict = detector.analyze(&channel);
//! println!("{}", verdict);
//! ```

use image::RgbImage;
use log::{debug, info};
use serde::Serialize;
use std::fmt;

use crate::analysis::chi_square::ChiSquareResult;
use crate::analysis::correlation::SpatialCorrelation;
use crate::analysis::lsb_plane::LsbPlaneStats;
use crate::analysis::scorer::{Indicator, SuspicionScorer};
use crate::analysis::run_battery;
use crate::error::Result;
use crate::processing::channel::{Channel, PixelChannel};
use crate::processing::steganography;

/// Scores above this are reported as suspicious when no message was found.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    SteganographyDetected,
    Suspicious,
    Normal,
}

impl DetectionStatus {
    fn classify(message: Option<&str>, score: f64) -> Self {
        if message.is_some() {
            DetectionStatus::SteganographyDetected
        } else if score > SUSPICIOUS_THRESHOLD {
            DetectionStatus::Suspicious
        } else {
            DetectionStatus::Normal
        }
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionStatus::SteganographyDetected => write!(f, "STEGANOGRAPHY DETECTED"),
            DetectionStatus::Suspicious => write!(f, "SUSPICIOUS - possible steganography"),
            DetectionStatus::Normal => write!(f, "NORMAL - no steganography detected"),
        }
    }
}

/// Outcome of analyzing one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspicionVerdict {
    /// Decoded hidden message, if a terminated one was found.
    pub message: Option<String>,
    pub score: f64,
    pub status: DetectionStatus,
    pub chi_square: ChiSquareResult,
    pub lsb_plane: LsbPlaneStats,
    pub correlation: SpatialCorrelation,
    pub indicators: Vec<Indicator>,
}

impl fmt::Display for SuspicionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => writeln!(f, "Message found: '{}'", message)?,
            None => writeln!(f, "No readable message found")?,
        }
        writeln!(
            f,
            "Chi-square: {:.2} (df {}, p = {:.4})",
            self.chi_square.statistic, self.chi_square.degrees_of_freedom, self.chi_square.p_value
        )?;
        writeln!(
            f,
            "LSB plane: mean {:.4}, variance {:.4}, entropy {:.4}, runs {} (p = {:.4})",
            self.lsb_plane.mean,
            self.lsb_plane.variance,
            self.lsb_plane.entropy,
            self.lsb_plane.runs_test.runs,
            self.lsb_plane.runs_test.p_value
        )?;
        writeln!(
            f,
            "Correlation: horizontal {:.4}, vertical {:.4}",
            self.correlation.horizontal, self.correlation.vertical
        )?;
        writeln!(f, "Suspicion score: {:.2}/1.0", self.score)?;
        write!(f, "Status: {}", self.status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LsbDetector {
    scorer: SuspicionScorer,
}

impl LsbDetector {
    /// Detector with the default weights and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scorer(scorer: SuspicionScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SuspicionScorer {
        &self.scorer
    }

    pub fn analyze(&self, channel: &PixelChannel) -> SuspicionVerdict {
        let message = steganography::extract_message(channel);
        match &message {
            Some(m) => info!("Hidden message found ({} characters)", m.chars().count()),
            None => debug!("No terminated message in the LSB plane"),
        }

        let battery = run_battery(channel);
        let scored = self.scorer.score(&battery.score_inputs());
        let status = DetectionStatus::classify(message.as_deref(), scored.score);

        debug!(
            "chi2 p = {:.4}, lsb mean = {:.4}, entropy = {:.4}, corr = ({:.3}, {:.3})",
            battery.chi_square.p_value,
            battery.lsb_plane.mean,
            battery.lsb_plane.entropy,
            battery.correlation.horizontal,
            battery.correlation.vertical
        );
        info!("Suspicion score {:.2} -> {:?}", scored.score, status);

        SuspicionVerdict {
            message,
            score: scored.score,
            status,
            chi_square: battery.chi_square,
            lsb_plane: battery.lsb_plane,
            correlation: battery.correlation,
            indicators: scored.indicators,
        }
    }

    /// Analyze one colour channel of an RGB image.
    pub fn analyze_image(&self, image: &RgbImage, channel: Channel) -> Result<SuspicionVerdict> {
        let plane = PixelChannel::from_rgb(image, channel)?;
        Ok(self.analyze(&plane))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_order() {
        assert_eq!(
            DetectionStatus::classify(Some("x"), 0.0),
            DetectionStatus::SteganographyDetected
        );
        assert_eq!(
            DetectionStatus::classify(Some(""), 1.0),
            DetectionStatus::SteganographyDetected
        );
        assert_eq!(DetectionStatus::classify(None, 0.6), DetectionStatus::Suspicious);
        assert_eq!(DetectionStatus::classify(None, 0.4), DetectionStatus::Normal);
        assert_eq!(DetectionStatus::classify(None, 0.0), DetectionStatus::Normal);
    }

    #[test]
    fn test_statistics_run_even_when_message_found() {
        let channel = PixelChannel::filled(50, 50, 128).unwrap();
        let stego = steganography::embed_message(&channel, "hi").unwrap();
        let verdict = LsbDetector::new().analyze(&stego);
        assert_eq!(verdict.message.as_deref(), Some("hi"));
        assert_eq!(verdict.indicators.len(), 4);
        assert!(verdict.chi_square.degrees_of_freedom > 0);
    }

    #[test]
    fn test_display_mentions_status_and_score() {
        let channel = PixelChannel::filled(20, 20, 100).unwrap();
        let text = LsbDetector::new().analyze(&channel).to_string();
        assert!(text.contains("No readable message found"));
        assert!(text.contains("Suspicion score"));
        assert!(text.contains("Status:"));
    }
}
