//! Recorded reference activities as handed out by the activity store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{LandmarkSet, MovementSequence};

/// Store-scoped activity identifier (`pose_3`, `movement_<uuid>`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random(kind: ActivityKind) -> Self {
        Self(format!("{}_{}", kind.prefix(), Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Pose,
    Movement,
}

impl ActivityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ActivityKind::Pose => "pose",
            ActivityKind::Movement => "movement",
        }
    }
}

/// Descriptive envelope; the comparison engine never reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    pub name: String,
    pub creator: String,
    pub is_public: bool,
    /// Recording length in milliseconds, when known
    pub duration_ms: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ActivityMetadata {
    pub fn new(name: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creator: creator.into(),
            is_public: false,
            duration_ms: None,
            created_at: Utc::now(),
        }
    }
}

/// Reference data the current user is scored against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ActivityReference {
    Pose(LandmarkSet),
    Movement(MovementSequence),
}

impl ActivityReference {
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityReference::Pose(_) => ActivityKind::Pose,
            ActivityReference::Movement(_) => ActivityKind::Movement,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ActivityReference::Pose(landmarks) => landmarks.is_empty(),
            ActivityReference::Movement(frames) => frames.is_empty(),
        }
    }
}

/// Activity as submitted for storage, before an id is minted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub metadata: ActivityMetadata,
    pub reference: ActivityReference,
}

/// Stored activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub metadata: ActivityMetadata,
    pub reference: ActivityReference,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        self.reference.kind()
    }
}
