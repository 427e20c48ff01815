//! Tunable comparison configuration.
//!
//! Difficulty thresholds and the similarity scorer constants are fixed; the
//! values here are product-tuning knobs for feedback generation and may be
//! recalibrated per deployment.

use mimic_core::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Mean per-region landmark distance above which a region is flagged
    pub region_difference_threshold: f64,

    /// Minimum visibility for a landmark pair to count in region analysis
    pub region_min_visibility: f64,

    /// Mean frame score below which a movement phase gets coaching
    pub phase_score_threshold: f64,

    /// `current / recorded` length ratio below which the attempt is "too short"
    pub shorter_length_ratio: f64,

    /// `current / recorded` length ratio above which the attempt is "too long"
    pub longer_length_ratio: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            region_difference_threshold: 0.15,
            region_min_visibility: 0.5,
            phase_score_threshold: 0.6,
            shorter_length_ratio: 0.8,
            longer_length_ratio: 1.2,
        }
    }
}

impl CompareConfig {
    /// Load configuration from file, with `MIMIC_*` environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MIMIC"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("MIMIC"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
