//! Injected activity id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use mimic_core::{ActivityId, ActivityKind};

/// Mints unique ids for newly stored activities
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, kind: ActivityKind) -> ActivityId;
}

/// `pose_<uuid>` / `movement_<uuid>` ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, kind: ActivityKind) -> ActivityId {
        ActivityId::random(kind)
    }
}

/// `pose_1`, `pose_2`, `movement_1`, ... with one counter per kind
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    pose: AtomicU64,
    movement: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self, kind: ActivityKind) -> ActivityId {
        let counter = match kind {
            ActivityKind::Pose => &self.pose,
            ActivityKind::Movement => &self.movement,
        };
        let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
        ActivityId::new(format!("{}_{}", kind.prefix(), n))
    }
}
