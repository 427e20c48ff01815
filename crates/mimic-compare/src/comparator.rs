//! Comparison orchestration for single poses and movement sequences.
//!
//! Both entry points are total: missing input, malformed input and internal
//! computation failures all come back as a zero-score [`ComparisonResult`]
//! carrying a diagnostic message, never as an error or a panic.

use mimic_core::{ComparisonResult, Difficulty, Error, Landmark, Result, TimestampedFrame};
use serde_json::Value;

use crate::alignment::cross_resample;
use crate::config::CompareConfig;
use crate::detector::{landmarks_from_value, sequence_from_value};
use crate::feedback::{
    flagged_regions, movement_feedback, movement_suggestions, pose_feedback, pose_suggestions,
    weak_phases,
};
use crate::similarity::try_similarity_score;
use crate::temporal::aggregate;
use crate::verdict::verdict;

const POSE_RECOVERY_HINT: &str = "Make sure your full body is visible to the camera";
const MOVEMENT_RECOVERY_HINT: &str = "Record a complete movement with your full body in view";
const RETRY_HINT: &str = "Please try again";

/// Stateless comparison engine parameterized by feedback tuning
#[derive(Debug, Clone, Default)]
pub struct PoseComparator {
    config: CompareConfig,
}

impl PoseComparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Score `current` against a `recorded` reference pose
    pub fn compare_poses(
        &self,
        recorded: &[Landmark],
        current: &[Landmark],
        difficulty: Difficulty,
    ) -> ComparisonResult {
        if recorded.is_empty() || current.is_empty() {
            return ComparisonResult::failure("Missing pose landmarks", POSE_RECOVERY_HINT);
        }

        match self.try_compare_poses(recorded, current, difficulty) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Pose comparison failed: {}", e);
                ComparisonResult::failure("Error comparing poses", RETRY_HINT)
            }
        }
    }

    fn try_compare_poses(
        &self,
        recorded: &[Landmark],
        current: &[Landmark],
        difficulty: Difficulty,
    ) -> Result<ComparisonResult> {
        let score = try_similarity_score(recorded, current)?;
        let is_match = verdict(score, difficulty);
        let flagged = flagged_regions(recorded, current, &self.config);

        tracing::debug!(
            score,
            %difficulty,
            is_match,
            flagged_regions = flagged.len(),
            "Pose compared"
        );

        Ok(ComparisonResult {
            is_match,
            score,
            feedback: pose_feedback(score, difficulty, is_match, &flagged),
            suggestions: pose_suggestions(&flagged, difficulty),
        })
    }

    /// Score a `current` movement attempt against a `recorded` reference
    pub fn compare_movement_sequence(
        &self,
        recorded: &[TimestampedFrame],
        current: &[TimestampedFrame],
        difficulty: Difficulty,
    ) -> ComparisonResult {
        if recorded.is_empty() || current.is_empty() {
            return ComparisonResult::failure("Missing movement data", MOVEMENT_RECOVERY_HINT);
        }

        match self.try_compare_movement(recorded, current, difficulty) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Movement comparison failed: {}", e);
                ComparisonResult::failure("Error comparing movement sequences", RETRY_HINT)
            }
        }
    }

    fn try_compare_movement(
        &self,
        recorded: &[TimestampedFrame],
        current: &[TimestampedFrame],
        difficulty: Difficulty,
    ) -> Result<ComparisonResult> {
        let (aligned_recorded, aligned_current) = cross_resample(recorded, current);

        let frame_scores = aligned_recorded
            .iter()
            .zip(aligned_current.iter())
            .map(|(r, c)| try_similarity_score(&r.landmarks, &c.landmarks))
            .collect::<Result<Vec<f64>>>()?;

        let score = aggregate(&frame_scores);
        if !score.is_finite() {
            return Err(Error::NonFiniteScore {
                stage: "temporal aggregation",
            });
        }

        let is_match = verdict(score, difficulty);
        let weak = weak_phases(&frame_scores, &self.config);

        tracing::debug!(
            score,
            %difficulty,
            is_match,
            frames = frame_scores.len(),
            recorded_frames = recorded.len(),
            current_frames = current.len(),
            "Movement compared"
        );

        Ok(ComparisonResult {
            is_match,
            score,
            feedback: movement_feedback(score, difficulty, is_match, &weak),
            suggestions: movement_suggestions(
                recorded.len(),
                current.len(),
                difficulty,
                &self.config,
            ),
        })
    }

    /// Pose comparison over untyped landmark arrays
    pub fn compare_poses_value(
        &self,
        recorded: &Value,
        current: &Value,
        difficulty: Difficulty,
    ) -> ComparisonResult {
        match (landmarks_from_value(recorded), landmarks_from_value(current)) {
            (Ok(r), Ok(c)) => self.compare_poses(&r, &c, difficulty),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Rejected pose data: {}", e);
                ComparisonResult::failure("Invalid pose data provided", POSE_RECOVERY_HINT)
            }
        }
    }

    /// Movement comparison over untyped frame arrays
    pub fn compare_movement_value(
        &self,
        recorded: &Value,
        current: &Value,
        difficulty: Difficulty,
    ) -> ComparisonResult {
        match (sequence_from_value(recorded), sequence_from_value(current)) {
            (Ok(r), Ok(c)) => self.compare_movement_sequence(&r, &c, difficulty),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Rejected movement data: {}", e);
                ComparisonResult::failure("Invalid movement data provided", MOVEMENT_RECOVERY_HINT)
            }
        }
    }
}

/// [`PoseComparator::compare_poses`] with the default configuration
pub fn compare_poses(
    recorded: &[Landmark],
    current: &[Landmark],
    difficulty: Difficulty,
) -> ComparisonResult {
    PoseComparator::default().compare_poses(recorded, current, difficulty)
}

/// [`PoseComparator::compare_movement_sequence`] with the default configuration
pub fn compare_movement_sequence(
    recorded: &[TimestampedFrame],
    current: &[TimestampedFrame],
    difficulty: Difficulty,
) -> ComparisonResult {
    PoseComparator::default().compare_movement_sequence(recorded, current, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::PoseLandmark;
    use serde_json::json;

    fn pose(offset: f64) -> Vec<Landmark> {
        (0..PoseLandmark::COUNT)
            .map(|i| {
                Landmark::with_visibility(0.5 + offset + i as f64 * 0.001, 0.5 + i as f64 * 0.002, 0.1, 0.9)
            })
            .collect()
    }

    fn movement(frames: usize, amplitude: f64) -> Vec<TimestampedFrame> {
        (0..frames)
            .map(|i| {
                let phase = i as f64 / frames as f64;
                let mut landmarks = pose(0.0);
                for lm in landmarks.iter_mut().skip(11).take(6) {
                    lm.y -= amplitude * (phase * std::f64::consts::PI).sin();
                }
                TimestampedFrame::new(i as f64 * 33.0, landmarks)
            })
            .collect()
    }

    #[test]
    fn test_identical_pose_medium() {
        let p = pose(0.0);
        let result = compare_poses(&p, &p, Difficulty::Medium);
        assert!(result.is_match);
        assert!((result.score - 1.0).abs() < 1e-10);
        assert!(result.feedback[0].starts_with("Great job!"));
        assert_eq!(result.feedback.len(), 1);
    }

    #[test]
    fn test_empty_vs_populated() {
        let result = compare_poses(&[], &pose(0.0), Difficulty::Medium);
        assert!(!result.is_match);
        assert_eq!(result.score, 0.0);
        assert!(result.feedback.contains(&"Missing pose landmarks".to_string()));
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_threshold_ordering() {
        let a = pose(0.0);
        let b = pose(0.075);
        let soft = compare_poses(&a, &b, Difficulty::Soft);
        let medium = compare_poses(&a, &b, Difficulty::Medium);
        let hard = compare_poses(&a, &b, Difficulty::Hard);

        assert_eq!(soft.score, medium.score);
        assert_eq!(medium.score, hard.score);
        // 0.075 everywhere scores 0.85
        assert!(soft.is_match && medium.is_match && !hard.is_match);
    }

    #[test]
    fn test_idempotent() {
        let a = pose(0.0);
        let b = pose(0.2);
        assert_eq!(
            compare_poses(&a, &b, Difficulty::Hard),
            compare_poses(&a, &b, Difficulty::Hard)
        );
    }

    #[test]
    fn test_movement_idempotent() {
        let recorded = movement(30, 0.2);
        let current = movement(24, 0.35);
        for difficulty in Difficulty::ALL {
            assert_eq!(
                compare_movement_sequence(&recorded, &current, difficulty),
                compare_movement_sequence(&recorded, &current, difficulty)
            );
        }
    }

    #[test]
    fn test_near_miss_headline() {
        // 0.1003 everywhere scores 0.7994, just under Medium
        let result = compare_poses(&pose(0.0), &pose(0.1003), Difficulty::Medium);
        assert!(!result.is_match);
        assert!((result.score - 0.7994).abs() < 1e-9);
        assert_eq!(
            result.feedback[0],
            "Your pose is 79% similar. Target: 80% (1% to go)."
        );
    }

    #[test]
    fn test_region_feedback_and_suggestions() {
        let recorded = pose(0.0);
        let mut current = recorded.clone();
        for lm in current.iter_mut().skip(25) {
            lm.y = (lm.y + 0.3).min(1.0);
        }

        let result = compare_poses(&recorded, &current, Difficulty::Hard);
        assert!(result.feedback.contains(&"Leg positions need adjustment".to_string()));
        assert!(!result.feedback.iter().any(|f| f.starts_with("Arm")));
        assert!(result.suggestions[0].contains("stance"));
        assert!(result.suggestions.last().unwrap().contains("precise"));
    }

    #[test]
    fn test_computation_failure_is_caught() {
        let mut a = pose(0.0);
        let mut b = pose(0.0);
        a[0].x = f64::INFINITY;
        b[0].x = f64::INFINITY;
        let result = compare_poses(&a, &b, Difficulty::Medium);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.feedback, vec!["Error comparing poses".to_string()]);

        let recorded = vec![TimestampedFrame::new(0.0, a)];
        let current = vec![TimestampedFrame::new(0.0, b)];
        let result = compare_movement_sequence(&recorded, &current, Difficulty::Medium);
        assert_eq!(
            result.feedback,
            vec!["Error comparing movement sequences".to_string()]
        );
    }

    #[test]
    fn test_identical_movement() {
        let seq = movement(30, 0.2);
        let result = compare_movement_sequence(&seq, &seq, Difficulty::Hard);
        assert!(result.is_match);
        assert!((result.score - 1.0).abs() < 1e-10);
        assert!(result.feedback[0].starts_with("Excellent movement!"));
        assert!(result.suggestions.iter().any(|s| s.contains("smooth")));
        assert!(result.suggestions.iter().any(|s| s.contains("timing")));
        assert!(result.suggestions.last().unwrap().contains("precisely"));
    }

    #[test]
    fn test_movement_missing_data() {
        let result = compare_movement_sequence(&movement(10, 0.1), &[], Difficulty::Soft);
        assert!(!result.is_match);
        assert_eq!(result.feedback, vec!["Missing movement data".to_string()]);
    }

    #[test]
    fn test_short_attempt_suggests_completion() {
        let recorded = movement(30, 0.2);
        let current: Vec<TimestampedFrame> = recorded[..15].to_vec();
        let result = compare_movement_sequence(&recorded, &current, Difficulty::Medium);
        assert!(result.suggestions[0].contains("complete the full"));
    }

    #[test]
    fn test_weak_end_phase() {
        let recorded = movement(30, 0.0);
        let mut current = recorded.clone();
        for frame in current.iter_mut().skip(20) {
            for lm in frame.landmarks.iter_mut() {
                lm.x = (lm.x - 0.4).max(0.0);
            }
        }
        // Edge frames are discounted, so a bad final third still scores ~0.81
        let result = compare_movement_sequence(&recorded, &current, Difficulty::Hard);
        assert!(!result.is_match);
        assert!(result.score > 0.8);
        assert!(result
            .feedback
            .iter()
            .any(|f| f == "The end of the movement needs refinement"));
        assert!(!result.feedback.iter().any(|f| f.contains("start")));
    }

    #[test]
    fn test_value_entry_points() {
        let comparator = PoseComparator::default();
        let good = serde_json::to_value(pose(0.0)).unwrap();

        let result = comparator.compare_poses_value(&good, &good, Difficulty::Medium);
        assert!(result.is_match);

        let result = comparator.compare_poses_value(&json!("nope"), &good, Difficulty::Medium);
        assert_eq!(result.feedback, vec!["Invalid pose data provided".to_string()]);

        let result = comparator.compare_poses_value(&json!([]), &good, Difficulty::Medium);
        assert_eq!(result.feedback, vec!["Missing pose landmarks".to_string()]);

        let seq = serde_json::to_value(movement(12, 0.1)).unwrap();
        let result = comparator.compare_movement_value(&seq, &seq, Difficulty::Soft);
        assert!(result.is_match);

        let result = comparator.compare_movement_value(&seq, &json!({"frames": 3}), Difficulty::Soft);
        assert_eq!(
            result.feedback,
            vec!["Invalid movement data provided".to_string()]
        );
    }

    #[test]
    fn test_custom_config_tightens_regions() {
        let config = CompareConfig {
            region_difference_threshold: 0.01,
            ..CompareConfig::default()
        };
        let comparator = PoseComparator::new(config);
        let result = comparator.compare_poses(&pose(0.0), &pose(0.02), Difficulty::Soft);
        assert!(result.is_match);
        assert_eq!(result.feedback.len(), 5);
    }
}
