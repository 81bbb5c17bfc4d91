//! Progress Store Port - Interface for persisting traversal progress.
//!
//! Snapshots are explicit: sessions never save or load on their own.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionTreeProgress;
use crate::domain::foundation::{ErrorCode, TreeId, UserId};

/// One trainee's progress through one tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressKey {
    pub tree_id: TreeId,
    pub user_id: UserId,
}

impl ProgressKey {
    pub fn new(tree_id: TreeId, user_id: UserId) -> Self {
        Self { tree_id, user_id }
    }

    pub fn for_progress(progress: &DecisionTreeProgress) -> Self {
        Self::new(progress.decision_tree_id().clone(), progress.user_id().clone())
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tree_id, self.user_id)
    }
}

/// Errors that can occur during progress storage operations
#[derive(Debug, thiserror::Error)]
pub enum ProgressStoreError {
    #[error("Progress not found for: {0}")]
    NotFound(ProgressKey),

    #[error("Failed to serialize progress: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize progress: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl ProgressStoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProgressStoreError::NotFound(_) => ErrorCode::ProgressNotFound,
            _ => ErrorCode::StorageError,
        }
    }
}

/// Port for persisting and loading progress snapshots
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Save a snapshot, replacing any previous one for the same key.
    async fn save(&self, progress: &DecisionTreeProgress) -> Result<(), ProgressStoreError>;

    /// Load a snapshot
    ///
    /// # Errors
    /// Returns `ProgressStoreError::NotFound` if no snapshot exists
    async fn load(&self, key: &ProgressKey) -> Result<DecisionTreeProgress, ProgressStoreError>;

    /// Check if a snapshot exists
    async fn exists(&self, key: &ProgressKey) -> Result<bool, ProgressStoreError>;

    /// Delete a snapshot. Deleting a missing snapshot is not an error.
    async fn delete(&self, key: &ProgressKey) -> Result<(), ProgressStoreError>;
}
