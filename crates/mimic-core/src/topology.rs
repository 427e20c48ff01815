//! 33-point body topology shared by the detector and every comparison.
//!
//! Landmark indices are a contract: two sets are only comparable when index
//! `i` denotes the same body point in both.

use serde::{Deserialize, Serialize};

/// Body landmark positions in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Number of landmarks in a complete set
    pub const COUNT: usize = 33;

    pub const ALL: [PoseLandmark; 33] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmarks that count double in similarity scoring: nose, shoulders,
    /// elbows, wrists, hips, knees, ankles.
    pub fn is_key(self) -> bool {
        KEY_LANDMARKS.contains(&self)
    }
}

/// Joints weighted 2.0 by the similarity scorer.
pub const KEY_LANDMARKS: [PoseLandmark; 13] = [
    PoseLandmark::Nose,
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftElbow,
    PoseLandmark::RightElbow,
    PoseLandmark::LeftWrist,
    PoseLandmark::RightWrist,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

/// Landmarks a usable reference recording must see clearly.
pub const ANCHOR_LANDMARKS: [PoseLandmark; 5] = [
    PoseLandmark::Nose,
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

/// Coarse body regions used for corrective feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRegion {
    Head,
    Arms,
    Torso,
    Legs,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 4] = [
        BodyRegion::Head,
        BodyRegion::Arms,
        BodyRegion::Torso,
        BodyRegion::Legs,
    ];

    /// Landmark indices belonging to the region. Regions overlap: shoulders
    /// and hips are shared with torso.
    pub fn indices(self) -> &'static [usize] {
        match self {
            BodyRegion::Head => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            BodyRegion::Arms => &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
            BodyRegion::Torso => &[11, 12, 23, 24],
            BodyRegion::Legs => &[23, 24, 25, 26, 27, 28, 29, 30, 31, 32],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Arms => "arms",
            BodyRegion::Torso => "torso",
            BodyRegion::Legs => "legs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_roundtrip() {
        for i in 0..PoseLandmark::COUNT {
            let lm = PoseLandmark::from_index(i).unwrap();
            assert_eq!(lm.index(), i);
        }
        assert!(PoseLandmark::from_index(33).is_none());
    }

    #[test]
    fn test_key_landmarks() {
        let keys: Vec<usize> = KEY_LANDMARKS.iter().map(|k| k.index()).collect();
        assert_eq!(keys, vec![0, 11, 12, 13, 14, 15, 16, 23, 24, 25, 26, 27, 28]);
        assert!(PoseLandmark::LeftWrist.is_key());
        assert!(!PoseLandmark::LeftHeel.is_key());
    }

    #[test]
    fn test_region_indices() {
        assert_eq!(BodyRegion::Head.indices().len(), 11);
        assert_eq!(BodyRegion::Arms.indices().len(), 12);
        assert_eq!(BodyRegion::Torso.indices(), &[11, 12, 23, 24]);
        assert_eq!(BodyRegion::Legs.indices().first(), Some(&23));
        assert_eq!(BodyRegion::Legs.indices().last(), Some(&32));
    }
}
