//! File-based Progress Store Adapter
//!
//! Stores each snapshot as a YAML file under `<base>/<tree_id>/<user_id>.yaml`.
//! Ids outside `[A-Za-z0-9_-]` are written as `~` followed by their URL-safe
//! base64 form, so distinct keys never share a path.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::decision::DecisionTreeProgress;
use crate::ports::{ProgressKey, ProgressStore, ProgressStoreError};

/// File-based storage for progress snapshots
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    base_path: PathBuf,
}

impl FileProgressStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProgressStore::new("./data/progress");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn tree_dir(&self, key: &ProgressKey) -> PathBuf {
        self.base_path.join(path_component(key.tree_id.as_str()))
    }

    fn snapshot_path(&self, key: &ProgressKey) -> PathBuf {
        self.tree_dir(key)
            .join(format!("{}.yaml", path_component(key.user_id.as_str())))
    }

    async fn ensure_dir(&self, path: &Path) -> Result<(), ProgressStoreError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))
    }
}

/// Maps an id to a file name that cannot escape the base directory.
/// Injective: plain ids never contain `~`, encoded ones always start with it.
fn path_component(id: &str) -> String {
    let plain = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if plain {
        id.to_string()
    } else {
        format!("~{}", URL_SAFE_NO_PAD.encode(id))
    }
}

#[async_trait]
impl ProgressStore for FileProgressStore {
    async fn save(&self, progress: &DecisionTreeProgress) -> Result<(), ProgressStoreError> {
        let key = ProgressKey::for_progress(progress);
        self.ensure_dir(&self.tree_dir(&key)).await?;

        let yaml = serde_yaml::to_string(progress)
            .map_err(|e| ProgressStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.snapshot_path(&key), yaml)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;

        tracing::debug!(key = %key, "Saved progress snapshot");
        Ok(())
    }

    async fn load(&self, key: &ProgressKey) -> Result<DecisionTreeProgress, ProgressStoreError> {
        let file_path = self.snapshot_path(key);

        if !file_path.exists() {
            return Err(ProgressStoreError::NotFound(key.clone()));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| ProgressStoreError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, key: &ProgressKey) -> Result<bool, ProgressStoreError> {
        Ok(self.snapshot_path(key).exists())
    }

    async fn delete(&self, key: &ProgressKey) -> Result<(), ProgressStoreError> {
        let file_path = self.snapshot_path(key);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
