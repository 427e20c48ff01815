//! Boundary adapter between the pose detector and the comparison engine.
//!
//! Detector output arrives either as a deserialized [`PoseDetection`] or as
//! untyped JSON from a store or a browser bridge. Only here is the landmark
//! shape checked at runtime; everything past this module is statically
//! typed.

use mimic_core::{Error, Landmark, LandmarkSet, MovementSequence, Result, TimestampedFrame};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalizer::normalize_set;

/// Landmark as reported by the detector, before normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl From<RawLandmark> for Landmark {
    fn from(raw: RawLandmark) -> Self {
        Landmark {
            x: raw.x,
            y: raw.y,
            z: raw.z,
            visibility: raw.visibility,
        }
    }
}

/// Per-frame detector result: one landmark list per detected person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseDetection {
    #[serde(default)]
    pub landmarks: Vec<Vec<RawLandmark>>,
}

impl PoseDetection {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Normalized landmarks of the first detected person, if any
pub fn extract_landmarks(detection: &PoseDetection) -> Option<LandmarkSet> {
    let person = detection.landmarks.first()?;
    if person.is_empty() {
        return None;
    }

    let raw: Vec<Landmark> = person.iter().map(|&raw| Landmark::from(raw)).collect();
    Some(normalize_set(&raw))
}

/// Validate and convert an untyped landmark array.
pub fn landmarks_from_value(value: &Value) -> Result<LandmarkSet> {
    landmarks_at(value, "$")
}

/// Validate and convert an untyped array of `{timestamp, landmarks}` frames.
pub fn sequence_from_value(value: &Value) -> Result<MovementSequence> {
    let frames = value
        .as_array()
        .ok_or_else(|| shape_error("$", "expected an array of frames"))?;

    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = format!("$[{i}]");
            let obj = frame
                .as_object()
                .ok_or_else(|| shape_error(&path, "expected a frame object"))?;

            let timestamp = number_field(obj, "timestamp", &path)?;
            if timestamp < 0.0 {
                return Err(shape_error(&path, "timestamp must be non-negative"));
            }

            let landmarks = obj
                .get("landmarks")
                .ok_or_else(|| shape_error(&path, "missing field 'landmarks'"))?;

            Ok(TimestampedFrame::new(
                timestamp,
                landmarks_at(landmarks, &format!("{path}.landmarks"))?,
            ))
        })
        .collect()
}

fn landmarks_at(value: &Value, path: &str) -> Result<LandmarkSet> {
    let items = value
        .as_array()
        .ok_or_else(|| shape_error(path, "expected an array of landmarks"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| landmark_at(item, &format!("{path}[{i}]")))
        .collect()
}

fn landmark_at(value: &Value, path: &str) -> Result<Landmark> {
    let obj = value
        .as_object()
        .ok_or_else(|| shape_error(path, "expected a landmark object"))?;

    let visibility = match obj.get("visibility") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_f64()
                .ok_or_else(|| shape_error(path, "field 'visibility' is not a number"))?,
        ),
    };

    Ok(Landmark {
        x: number_field(obj, "x", path)?,
        y: number_field(obj, "y", path)?,
        z: number_field(obj, "z", path)?,
        visibility,
    })
}

fn number_field(obj: &Map<String, Value>, field: &str, path: &str) -> Result<f64> {
    match obj.get(field) {
        Some(v) => v
            .as_f64()
            .ok_or_else(|| shape_error(path, &format!("field '{field}' is not a number"))),
        None => Err(shape_error(path, &format!("missing field '{field}'"))),
    }
}

fn shape_error(path: &str, reason: &str) -> Error {
    Error::InvalidShape {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
