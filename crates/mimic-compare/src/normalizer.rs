//! Canonical value ranges for raw detector landmarks.

use mimic_core::{Landmark, LandmarkSet};

/// Clamp `x`, `y` and a present `visibility` into [0, 1].
///
/// `z` is relative depth and is left untouched. Out-of-range values saturate
/// rather than being rejected; NaN passes through unchanged and is filtered
/// later by the scorer.
pub fn normalize(landmark: &Landmark) -> Landmark {
    Landmark {
        x: landmark.x.clamp(0.0, 1.0),
        y: landmark.y.clamp(0.0, 1.0),
        z: landmark.z,
        visibility: landmark.visibility.map(|v| v.clamp(0.0, 1.0)),
    }
}

pub fn normalize_set(landmarks: &[Landmark]) -> LandmarkSet {
    landmarks.iter().map(normalize).collect()
}
