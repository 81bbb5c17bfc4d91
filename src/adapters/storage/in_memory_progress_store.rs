//! In-Memory Progress Store Adapter
//!
//! Keeps progress snapshots in memory. Useful for tests and for
//! single-process runs where nothing needs to outlive the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::DecisionTreeProgress;
use crate::ports::{ProgressKey, ProgressStore, ProgressStoreError};

/// In-memory storage for progress snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressStore {
    snapshots: Arc<RwLock<HashMap<ProgressKey, DecisionTreeProgress>>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored snapshots
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }

    /// Get the number of stored snapshots
    pub async fn snapshot_count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn save(&self, progress: &DecisionTreeProgress) -> Result<(), ProgressStoreError> {
        self.snapshots
            .write()
            .await
            .insert(ProgressKey::for_progress(progress), progress.clone());
        Ok(())
    }

    async fn load(&self, key: &ProgressKey) -> Result<DecisionTreeProgress, ProgressStoreError> {
        self.snapshots
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| ProgressStoreError::NotFound(key.clone()))
    }

    async fn exists(&self, key: &ProgressKey) -> Result<bool, ProgressStoreError> {
        Ok(self.snapshots.read().await.contains_key(key))
    }

    async fn delete(&self, key: &ProgressKey) -> Result<(), ProgressStoreError> {
        self.snapshots.write().await.remove(key);
        Ok(())
    }
}
