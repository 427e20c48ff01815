//! Recording quality gates for reference poses and movement sequences.
//!
//! Quality defects never fail a comparison; they are surfaced as advisory
//! issues so the recorder can retake a poor reference.

use mimic_core::{Landmark, PoseLandmark, TimestampedFrame, ANCHOR_LANDMARKS};
use serde::{Deserialize, Serialize};

/// Visibility below which an anchor landmark counts as unseen
const ANCHOR_MIN_VISIBILITY: f64 = 0.5;
/// More unseen anchors than this invalidates a pose
const MAX_UNSEEN_ANCHORS: usize = 2;

const MIN_DURATION_MS: f64 = 1000.0;
const MIN_FRAME_RATE: f64 = 10.0;
const MIN_AVERAGE_CONFIDENCE: f64 = 0.5;
/// Inter-frame interval counted as a tracking gap
const GAP_THRESHOLD_MS: f64 = 200.0;
/// Fraction of frames that may be followed by a gap
const MAX_GAP_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseQualityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceStats {
    pub total_frames: usize,
    /// Last minus first timestamp, in milliseconds
    pub duration: f64,
    pub average_confidence: f64,
    /// Frames per second
    pub frame_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceQualityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub stats: SequenceStats,
}

pub fn validate_pose_quality(landmarks: &[Landmark]) -> PoseQualityReport {
    if landmarks.is_empty() {
        return PoseQualityReport {
            is_valid: false,
            issues: vec!["No landmarks detected".to_string()],
        };
    }

    let mut issues = Vec::new();

    if landmarks.len() != PoseLandmark::COUNT {
        issues.push(format!(
            "Expected {} landmarks, got {}",
            PoseLandmark::COUNT,
            landmarks.len()
        ));
    }

    let unseen_anchors = ANCHOR_LANDMARKS
        .iter()
        .filter(|anchor| {
            landmarks
                .get(anchor.index())
                .and_then(|lm| lm.visibility)
                .map_or(true, |v| v < ANCHOR_MIN_VISIBILITY)
        })
        .count();

    if unseen_anchors > MAX_UNSEEN_ANCHORS {
        issues.push("Too many key landmarks have low visibility".to_string());
    }

    let unit = 0.0..=1.0;
    if landmarks
        .iter()
        .any(|lm| !unit.contains(&lm.x) || !unit.contains(&lm.y))
    {
        issues.push("Invalid coordinates present".to_string());
    }

    PoseQualityReport {
        is_valid: issues.is_empty(),
        issues,
    }
}

pub fn validate_movement_sequence(sequence: &[TimestampedFrame]) -> SequenceQualityReport {
    let (first, last) = match (sequence.first(), sequence.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return SequenceQualityReport {
                is_valid: false,
                issues: vec!["No movement data recorded".to_string()],
                stats: SequenceStats::default(),
            }
        }
    };

    let stats = sequence_stats(sequence, first, last);
    let mut issues = Vec::new();

    if stats.duration < MIN_DURATION_MS {
        issues.push("Movement too short (minimum 1 second)".to_string());
    }

    // A zero-length recording has no rate to judge; "too short" covers it
    if stats.duration > 0.0 && stats.frame_rate < MIN_FRAME_RATE {
        issues.push(format!("Frame rate too low ({:.1} fps)", stats.frame_rate));
    }

    if stats.average_confidence < MIN_AVERAGE_CONFIDENCE {
        issues.push(format!(
            "Detection confidence too low ({:.0}%)",
            stats.average_confidence * 100.0
        ));
    }

    let gaps = sequence
        .windows(2)
        .filter(|w| w[1].timestamp.millis_since(w[0].timestamp) > GAP_THRESHOLD_MS)
        .count();

    if gaps as f64 > stats.total_frames as f64 * MAX_GAP_FRACTION {
        issues.push("Too many gaps in movement data".to_string());
    }

    SequenceQualityReport {
        is_valid: issues.is_empty(),
        issues,
        stats,
    }
}

fn sequence_stats(
    sequence: &[TimestampedFrame],
    first: &TimestampedFrame,
    last: &TimestampedFrame,
) -> SequenceStats {
    let total_frames = sequence.len();
    let duration = last.timestamp.millis_since(first.timestamp);

    let average_confidence =
        sequence.iter().map(TimestampedFrame::confidence).sum::<f64>() / total_frames as f64;

    // Reported as 0 rather than infinity so the stats stay JSON-representable
    let frame_rate = if duration > 0.0 {
        total_frames as f64 / (duration / 1000.0)
    } else {
        0.0
    };

    SequenceStats {
        total_frames,
        duration,
        average_confidence,
        frame_rate,
    }
}
