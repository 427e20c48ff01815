//! Fundamental value types for pose and movement comparison.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single tracked body point.
///
/// `x` and `y` are normalized to the visible frame, `z` is relative depth and
/// may be negative. A missing `visibility` is scored as fully visible but is
/// kept distinct from an explicit 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    pub fn with_visibility(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// Visibility with the scoring convention applied (absent = 1.0)
    pub fn effective_visibility(&self) -> f64 {
        self.visibility.unwrap_or(1.0)
    }

    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.to_nalgebra(), &other.to_nalgebra())
    }
}

/// Full body pose at one instant, indexed by [`crate::PoseLandmark`].
pub type LandmarkSet = Vec<Landmark>;

/// Capture time in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`
    pub fn millis_since(&self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

/// One sampled pose inside a movement recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedFrame {
    pub timestamp: Timestamp,
    pub landmarks: LandmarkSet,
}

impl TimestampedFrame {
    pub fn new(timestamp_ms: f64, landmarks: LandmarkSet) -> Self {
        Self {
            timestamp: Timestamp::from_millis(timestamp_ms),
            landmarks,
        }
    }

    /// Mean of the visibilities the detector reported; 0 when none were
    pub fn confidence(&self) -> f64 {
        let (sum, count) = self
            .landmarks
            .iter()
            .filter_map(|lm| lm.visibility)
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

        if count > 0 {
            sum / count as f64
        } else {
            0.0
        }
    }
}

/// Time-ordered recording of a dynamic motion.
pub type MovementSequence = Vec<TimestampedFrame>;

/// Named tolerance preset bound to a fixed similarity threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Soft,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Soft, Difficulty::Medium, Difficulty::Hard];

    /// Minimum similarity score accepted as a match
    pub fn threshold(&self) -> f64 {
        match self {
            Difficulty::Soft => 0.70,
            Difficulty::Medium => 0.80,
            Difficulty::Hard => 0.90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Soft => "soft",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(Difficulty::Soft),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(Error::InvalidInput(format!("unknown difficulty '{other}'"))),
        }
    }
}

/// Outcome of one comparison call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub is_match: bool,
    /// Similarity in [0, 1]
    pub score: f64,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ComparisonResult {
    /// Zero-score result used for missing, malformed or failed comparisons
    pub fn failure(feedback: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            is_match: false,
            score: 0.0,
            feedback: vec![feedback.into()],
            suggestions: vec![suggestion.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_effective_visibility() {
        assert_eq!(Landmark::new(0.1, 0.2, 0.0).effective_visibility(), 1.0);
        assert_eq!(
            Landmark::with_visibility(0.1, 0.2, 0.0, 0.4).effective_visibility(),
            0.4
        );
    }

    #[test]
    fn test_frame_confidence_ignores_missing_visibility() {
        let frame = TimestampedFrame::new(
            0.0,
            vec![
                Landmark::with_visibility(0.5, 0.5, 0.0, 0.8),
                Landmark::new(0.5, 0.5, 0.0),
                Landmark::with_visibility(0.5, 0.5, 0.0, 0.4),
            ],
        );
        assert!((frame.confidence() - 0.6).abs() < 1e-10);

        let blind = TimestampedFrame::new(0.0, vec![Landmark::new(0.5, 0.5, 0.0)]);
        assert_eq!(blind.confidence(), 0.0);
    }

    #[test]
    fn test_difficulty_thresholds_ordered() {
        assert!(Difficulty::Soft.threshold() < Difficulty::Medium.threshold());
        assert!(Difficulty::Medium.threshold() < Difficulty::Hard.threshold());
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_comparison_result_serializes_camel_case() {
        let result = ComparisonResult::failure("Missing pose landmarks", "Try again");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isMatch"], serde_json::Value::Bool(false));
        assert_eq!(json["score"], 0.0);
    }

    #[test]
    fn test_landmark_visibility_optional_in_json() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.1,"y":0.2,"z":-0.3}"#).unwrap();
        assert_eq!(lm.visibility, None);
        let json = serde_json::to_string(&lm).unwrap();
        assert!(!json.contains("visibility"));
    }
}
