//! Match verdicts from a score and a difficulty preset.

use mimic_core::Difficulty;

/// `true` when `score` reaches the difficulty's fixed threshold
pub fn verdict(score: f64, difficulty: Difficulty) -> bool {
    score >= difficulty.threshold()
}

/// Whole percent a score is reported as.
///
/// A miss is never shown at or above the target, so a score just under the
/// threshold reads one point short instead of rounding up onto it.
pub fn display_percent(score: f64, difficulty: Difficulty) -> u32 {
    let percent = as_percent(score);
    if verdict(score, difficulty) {
        percent
    } else {
        percent.min(target_percent(difficulty).saturating_sub(1))
    }
}

pub fn target_percent(difficulty: Difficulty) -> u32 {
    as_percent(difficulty.threshold())
}

/// Percentage points still missing to reach the threshold, at least 1 on a miss
pub fn points_to_target(score: f64, difficulty: Difficulty) -> u32 {
    target_percent(difficulty).saturating_sub(display_percent(score, difficulty))
}

fn as_percent(value: f64) -> u32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_inclusive() {
        assert!(verdict(0.70, Difficulty::Soft));
        assert!(!verdict(0.6999, Difficulty::Soft));
        assert!(verdict(0.80, Difficulty::Medium));
        assert!(verdict(0.90, Difficulty::Hard));
        assert!(!verdict(0.89, Difficulty::Hard));
    }

    #[test]
    fn test_monotonic_across_difficulties() {
        for step in 0..=100 {
            let score = step as f64 / 100.0;
            let soft = verdict(score, Difficulty::Soft);
            let medium = verdict(score, Difficulty::Medium);
            let hard = verdict(score, Difficulty::Hard);
            assert!(soft >= medium && medium >= hard, "score {score}");
        }
    }

    #[test]
    fn test_points_to_target() {
        assert_eq!(points_to_target(0.65, Difficulty::Medium), 15);
        assert_eq!(points_to_target(0.95, Difficulty::Hard), 0);
        assert_eq!(points_to_target(0.90, Difficulty::Hard), 0);
    }

    #[test]
    fn test_near_miss_stays_below_target() {
        for difficulty in Difficulty::ALL {
            let threshold = difficulty.threshold();
            for delta in [1e-9, 1e-4, 0.0006, 0.004, 0.0049] {
                let score = threshold - delta;
                assert!(!verdict(score, difficulty));
                assert!(
                    display_percent(score, difficulty) < target_percent(difficulty),
                    "{difficulty} at {score}"
                );
                assert!(points_to_target(score, difficulty) >= 1, "{difficulty} at {score}");
            }
        }
        assert_eq!(display_percent(0.7994, Difficulty::Medium), 79);
        assert_eq!(points_to_target(0.7994, Difficulty::Medium), 1);
    }
}
