//! In-memory dataset store, used for `STORAGE=memory` and in tests

use super::{DatasetStore, StorageError};
use async_trait::async_trait;
use athlete_types::Dataset;
use tokio::sync::RwLock;

/// Keeps the dataset in process memory; nothing survives a restart
pub struct MemoryStore {
    data: RwLock<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_dataset(Dataset::default())
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn load(&self) -> Result<Dataset, StorageError> {
        Ok(self.data.read().await.clone())
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        *self.data.write().await = dataset.clone();
        Ok(())
    }
}
