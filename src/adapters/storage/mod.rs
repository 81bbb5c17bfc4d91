//! Storage Adapters
//!
//! Implementations of the ProgressStore port.
//!
//! ## Available Adapters
//!
//! - **FileProgressStore** - Stores snapshots as YAML files on disk
//! - **InMemoryProgressStore** - Stores snapshots in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileProgressStore, InMemoryProgressStore};
//!
//! let store = FileProgressStore::new("./data/progress");
//! let store = InMemoryProgressStore::new();
//! ```

mod file_progress_store;
mod in_memory_progress_store;

pub use file_progress_store::FileProgressStore;
pub use in_memory_progress_store::InMemoryProgressStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::ProgressStore;

/// Builds the configured progress store.
pub fn from_config(config: &StorageConfig) -> Arc<dyn ProgressStore> {
    match config.backend {
        StorageBackend::InMemory => Arc::new(InMemoryProgressStore::new()),
        StorageBackend::File => Arc::new(FileProgressStore::new(&config.path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DecisionTreeProgress;
    use crate::domain::foundation::{TreeId, UserId};
    use crate::ports::ProgressKey;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_backend_writes_under_configured_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: temp_dir.path().to_path_buf(),
        };
        let store = from_config(&config);
        let progress = DecisionTreeProgress::new(UserId::new("u").unwrap(), TreeId::new("t"), None);

        store.save(&progress).await.unwrap();

        assert!(temp_dir.path().join("t").join("u.yaml").exists());
        assert!(store.exists(&ProgressKey::for_progress(&progress)).await.unwrap());
    }

    #[tokio::test]
    async fn in_memory_backend_is_default() {
        let store = from_config(&StorageConfig::default());
        let progress = DecisionTreeProgress::new(UserId::new("u").unwrap(), TreeId::new("t"), None);

        store.save(&progress).await.unwrap();
        assert!(store.exists(&ProgressKey::for_progress(&progress)).await.unwrap());
    }
}
