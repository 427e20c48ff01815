//! Activity store contract and in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use mimic_compare::{validate_movement_sequence, validate_pose_quality};
use mimic_core::{
    Activity, ActivityId, ActivityMetadata, ActivityReference, Error, NewActivity, Result,
};
use tokio::sync::RwLock;

use crate::id::{IdGenerator, UuidIdGenerator};

/// Durable storage of recorded reference activities.
///
/// Every returned [`Activity`] is an independent copy; mutating it never
/// affects the stored record.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Persist a new activity and return it with its minted id
    async fn create(&self, activity: NewActivity) -> Result<Activity>;

    async fn get(&self, id: &ActivityId) -> Result<Option<Activity>>;

    /// All activities in creation order
    async fn list(&self) -> Result<Vec<Activity>>;

    /// Replace the metadata envelope of an existing activity
    async fn update_metadata(&self, id: &ActivityId, metadata: ActivityMetadata)
        -> Result<Activity>;

    /// Returns `false` when no activity had this id
    async fn delete(&self, id: &ActivityId) -> Result<bool>;
}

#[derive(Default)]
struct Inner {
    activities: HashMap<ActivityId, (u64, Activity)>,
    next_seq: u64,
}

/// Process-local store, mainly for tests and single-session use
pub struct InMemoryActivityStore {
    inner: RwLock<Inner>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::with_id_generator(UuidIdGenerator)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            ids: Box::new(ids),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.activities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn create(&self, activity: NewActivity) -> Result<Activity> {
        let NewActivity {
            mut metadata,
            reference,
        } = activity;

        if reference.is_empty() {
            return Err(Error::InvalidInput(format!(
                "{} activity has no reference data",
                reference.kind().prefix()
            )));
        }

        match &reference {
            ActivityReference::Pose(landmarks) => {
                let report = validate_pose_quality(landmarks);
                if !report.is_valid {
                    tracing::debug!("Storing pose with quality issues: {:?}", report.issues);
                }
            }
            ActivityReference::Movement(frames) => {
                let report = validate_movement_sequence(frames);
                if !report.is_valid {
                    tracing::debug!("Storing movement with quality issues: {:?}", report.issues);
                }
                metadata.duration_ms.get_or_insert(report.stats.duration);
            }
        }

        let activity = Activity {
            id: self.ids.next_id(reference.kind()),
            metadata,
            reference,
        };

        let mut inner = self.inner.write().await;
        if inner.activities.contains_key(&activity.id) {
            return Err(Error::Storage(format!("duplicate activity id {}", activity.id)));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .activities
            .insert(activity.id.clone(), (seq, activity.clone()));

        tracing::info!("Stored activity {} ({})", activity.id, activity.metadata.name);

        Ok(activity)
    }

    async fn get(&self, id: &ActivityId) -> Result<Option<Activity>> {
        let inner = self.inner.read().await;
        Ok(inner.activities.get(id).map(|(_, a)| a.clone()))
    }

    async fn list(&self) -> Result<Vec<Activity>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&(u64, Activity)> = inner.activities.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, a)| a.clone()).collect())
    }

    async fn update_metadata(
        &self,
        id: &ActivityId,
        metadata: ActivityMetadata,
    ) -> Result<Activity> {
        let mut inner = self.inner.write().await;
        let (_, activity) = inner
            .activities
            .get_mut(id)
            .ok_or_else(|| Error::ActivityNotFound(id.clone()))?;

        activity.metadata = metadata;
        Ok(activity.clone())
    }

    async fn delete(&self, id: &ActivityId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let removed = inner.activities.remove(id).is_some();
        if removed {
            tracing::info!("Deleted activity {}", id);
        }
        Ok(removed)
    }
}
