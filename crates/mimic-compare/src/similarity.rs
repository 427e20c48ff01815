//! Weighted landmark-distance similarity between two poses.
//!
//! ## Scoring
//!
//! For every index present in both sets, pairs with a NaN coordinate or with
//! visibility below [`MIN_VISIBILITY`] on either side are skipped. Surviving
//! pairs contribute their 3D Euclidean distance, doubled for key joints:
//!
//! ```text
//! d̄ = Σ(dᵢ·wᵢ) / Σwᵢ
//! similarity = clamp(1 − d̄ / MAX_EXPECTED_DISTANCE, 0, 1)
//! ```

use mimic_core::{Error, Landmark, PoseLandmark, Result};

/// Pairs where either side is less visible than this are ignored
pub const MIN_VISIBILITY: f64 = 0.3;
/// Weight applied to [`mimic_core::KEY_LANDMARKS`]
pub const KEY_LANDMARK_WEIGHT: f64 = 2.0;
/// Average distance at which similarity saturates to 0
pub const MAX_EXPECTED_DISTANCE: f64 = 0.5;

/// Similarity in [0, 1] between two landmark sets of the same layout.
///
/// Empty input, or input with no comparable pairs, scores 0. A computation
/// that cannot produce a finite value also scores 0; use
/// [`try_similarity_score`] to observe that case.
pub fn calculate_similarity_score(a: &[Landmark], b: &[Landmark]) -> f64 {
    try_similarity_score(a, b).unwrap_or(0.0)
}

/// Like [`calculate_similarity_score`] but reports non-finite results.
pub fn try_similarity_score(a: &[Landmark], b: &[Landmark]) -> Result<f64> {
    if a.is_empty() || b.is_empty() {
        return Ok(0.0);
    }

    let mut weighted_distance = 0.0;
    let mut total_weight = 0.0;

    for (idx, (la, lb)) in a.iter().zip(b.iter()).enumerate() {
        if !is_comparable(la, lb) {
            continue;
        }

        let weight = landmark_weight(idx);
        weighted_distance += la.distance_to(lb) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return Ok(0.0);
    }

    let average_distance = weighted_distance / total_weight;
    let similarity = (1.0 - average_distance / MAX_EXPECTED_DISTANCE).clamp(0.0, 1.0);

    if similarity.is_finite() {
        Ok(similarity)
    } else {
        Err(Error::NonFiniteScore {
            stage: "similarity",
        })
    }
}

fn is_comparable(a: &Landmark, b: &Landmark) -> bool {
    !a.has_nan()
        && !b.has_nan()
        && a.effective_visibility() >= MIN_VISIBILITY
        && b.effective_visibility() >= MIN_VISIBILITY
}

fn landmark_weight(idx: usize) -> f64 {
    match PoseLandmark::from_index(idx) {
        Some(lm) if lm.is_key() => KEY_LANDMARK_WEIGHT,
        _ => 1.0,
    }
}
