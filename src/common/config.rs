//! # Configuration Utilities
//!
//! TOML configuration for the detector and the command-line tool. Every
//! section is optional; missing keys fall back to the built-in defaults.
//!
//! ```toml
//! [analysis]
//! channel = "red"
//!
//! [scoring.weights]
//! chi_square = 0.4
//!
//! [scoring.thresholds]
//! chi_square_p_value = 0.01
//!
//! [cover]
//! width = 200
//! height = 200
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::scorer::{IndicatorThresholds, IndicatorWeights, SuspicionScorer};
use crate::processing::channel::Channel;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: DetectorConfig = load_config("config/detector.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: T =
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub analysis: AnalysisConfig,
    pub scoring: ScoringConfig,
    pub cover: CoverConfig,
}

impl DetectorConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub fn from_optional_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => load_config(p),
            None => Ok(Self::default()),
        }
    }

    pub fn scorer(&self) -> SuspicionScorer {
        SuspicionScorer::new(self.scoring.weights, self.scoring.thresholds)
    }
}

/// Which channel to embed into and analyze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub channel: Channel,
}

/// Indicator weights and thresholds for the suspicion scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: IndicatorWeights,
    pub thresholds: IndicatorThresholds,
}

/// Size and sample range of generated cover images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub width: u32,
    pub height: u32,
    /// Inclusive lower bound for random samples.
    pub min_value: u8,
    /// Exclusive upper bound for random samples.
    pub max_value: u8,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            min_value: 50,
            max_value: 200,
        }
    }
}
