//! Human-readable coaching text derived from scores and landmark deltas.
//!
//! Pose feedback looks at four overlapping body regions and reports the ones
//! whose mean landmark distance exceeds the configured threshold. Movement
//! feedback splits the per-frame scores into beginning, middle and end and
//! coaches the weak phases.

use mimic_core::{BodyRegion, Difficulty, Landmark};
use serde::{Deserialize, Serialize};

use crate::config::CompareConfig;
use crate::temporal::phase_means;
use crate::verdict::{display_percent, points_to_target, target_percent};

/// Order in which region suggestions are emitted
const SUGGESTION_ORDER: [BodyRegion; 4] = [
    BodyRegion::Arms,
    BodyRegion::Legs,
    BodyRegion::Torso,
    BodyRegion::Head,
];

/// Mean distance between recorded and current landmarks within a region.
///
/// Only pairs where both sides meet `min_visibility` (absent visibility
/// counts as visible) and carry no NaN are included. Returns `None` when no
/// pair qualifies.
pub fn region_mean_distance(
    recorded: &[Landmark],
    current: &[Landmark],
    region: BodyRegion,
    min_visibility: f64,
) -> Option<f64> {
    let (sum, count) = region
        .indices()
        .iter()
        .filter_map(|&idx| Some((recorded.get(idx)?, current.get(idx)?)))
        .filter(|(r, c)| {
            !r.has_nan()
                && !c.has_nan()
                && r.effective_visibility() >= min_visibility
                && c.effective_visibility() >= min_visibility
        })
        .fold((0.0, 0usize), |(s, n), (r, c)| (s + r.distance_to(c), n + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Regions whose mean distance exceeds the configured threshold, in
/// head/arms/torso/legs order
pub fn flagged_regions(
    recorded: &[Landmark],
    current: &[Landmark],
    config: &CompareConfig,
) -> Vec<BodyRegion> {
    BodyRegion::ALL
        .into_iter()
        .filter(|&region| {
            region_mean_distance(recorded, current, region, config.region_min_visibility)
                .is_some_and(|d| d > config.region_difference_threshold)
        })
        .collect()
}

pub fn pose_feedback(
    score: f64,
    difficulty: Difficulty,
    is_match: bool,
    flagged: &[BodyRegion],
) -> Vec<String> {
    let percent = display_percent(score, difficulty);
    let target = target_percent(difficulty);

    let headline = if is_match {
        format!("Great job! Your pose matches with {percent}% accuracy.")
    } else {
        format!(
            "Your pose is {percent}% similar. Target: {target}% ({}% to go).",
            points_to_target(score, difficulty)
        )
    };

    let mut feedback = vec![headline];
    feedback.extend(flagged.iter().map(|&r| region_feedback(r).to_string()));
    feedback
}

pub fn pose_suggestions(flagged: &[BodyRegion], difficulty: Difficulty) -> Vec<String> {
    let mut suggestions: Vec<String> = SUGGESTION_ORDER
        .into_iter()
        .filter(|r| flagged.contains(r))
        .map(|r| region_suggestion(r).to_string())
        .collect();

    if suggestions.is_empty() {
        suggestions.push("Great form! Hold the pose steady to lock it in".to_string());
    }

    match difficulty {
        Difficulty::Hard => {
            suggestions.push("Hard mode: focus on precise joint positioning".to_string())
        }
        Difficulty::Soft => {
            suggestions.push("Focus on matching the general shape of the pose".to_string())
        }
        Difficulty::Medium => {}
    }

    suggestions
}

fn region_feedback(region: BodyRegion) -> &'static str {
    match region {
        BodyRegion::Head => "Head position needs adjustment",
        BodyRegion::Arms => "Arm positions need adjustment",
        BodyRegion::Torso => "Torso alignment needs adjustment",
        BodyRegion::Legs => "Leg positions need adjustment",
    }
}

fn region_suggestion(region: BodyRegion) -> &'static str {
    match region {
        BodyRegion::Arms => "Match the angle of your arms and the height of your hands",
        BodyRegion::Legs => "Adjust your stance and the bend of your knees",
        BodyRegion::Torso => "Straighten your torso and square your shoulders and hips",
        BodyRegion::Head => "Keep your head level and facing the same way as the reference",
    }
}

/// Phase of a movement sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPhase {
    Beginning,
    Middle,
    End,
}

impl MovementPhase {
    pub const ALL: [MovementPhase; 3] = [
        MovementPhase::Beginning,
        MovementPhase::Middle,
        MovementPhase::End,
    ];

    pub fn coaching(&self) -> &'static str {
        match self {
            MovementPhase::Beginning => "The start of the movement needs work",
            MovementPhase::Middle => "The middle of the movement drifts from the reference",
            MovementPhase::End => "The end of the movement needs refinement",
        }
    }
}

/// Phases whose mean frame score falls below the configured threshold
pub fn weak_phases(frame_scores: &[f64], config: &CompareConfig) -> Vec<MovementPhase> {
    MovementPhase::ALL
        .into_iter()
        .zip(phase_means(frame_scores))
        .filter_map(|(phase, mean)| {
            mean.filter(|&m| m < config.phase_score_threshold)
                .map(|_| phase)
        })
        .collect()
}

pub fn movement_feedback(
    score: f64,
    difficulty: Difficulty,
    is_match: bool,
    weak: &[MovementPhase],
) -> Vec<String> {
    let percent = display_percent(score, difficulty);
    let target = target_percent(difficulty);

    let headline = if is_match {
        format!("Excellent movement! {percent}% accuracy.")
    } else {
        format!(
            "Movement is {percent}% similar. Target: {target}% ({}% to go).",
            points_to_target(score, difficulty)
        )
    };

    let mut feedback = vec![headline];
    feedback.extend(weak.iter().map(|p| p.coaching().to_string()));
    feedback
}

pub fn movement_suggestions(
    recorded_len: usize,
    current_len: usize,
    difficulty: Difficulty,
    config: &CompareConfig,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    let recorded = recorded_len as f64;
    let current = current_len as f64;

    if current < recorded * config.shorter_length_ratio {
        suggestions.push("Try to complete the full movement sequence".to_string());
    } else if current > recorded * config.longer_length_ratio {
        suggestions.push("Try to match the pace of the reference movement".to_string());
    }

    suggestions.push("Keep your movements smooth and controlled".to_string());
    suggestions.push("Maintain consistent timing throughout the movement".to_string());

    if difficulty == Difficulty::Hard {
        suggestions.push("Hard mode: hit each position precisely at the right moment".to_string());
    }

    suggestions
}
