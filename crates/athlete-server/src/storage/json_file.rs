//! Flat JSON file store
//!
//! `save` overwrites the file in place with `tokio::fs::write`. A crash in
//! the middle of that write can leave a truncated file behind; under
//! `LoadPolicy::Strict` the next startup then refuses to run.

use super::{DatasetStore, LoadPolicy, StorageError};
use async_trait::async_trait;
use athlete_types::Dataset;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct JsonFileStore {
    path: PathBuf,
    policy: LoadPolicy,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    async fn initialize(&self) -> Result<Dataset, StorageError> {
        info!(
            "Dataset file {} not found, creating empty dataset",
            self.path.display()
        );
        let dataset = Dataset::default();
        self.save(&dataset).await?;
        Ok(dataset)
    }

    fn recover(&self, err: StorageError) -> Result<Dataset, StorageError> {
        match self.policy {
            LoadPolicy::Strict => Err(err),
            LoadPolicy::Recover => {
                warn!(
                    "Failed to load {}, continuing with empty dataset: {}",
                    self.path.display(),
                    err
                );
                Ok(Dataset::default())
            }
        }
    }
}

#[async_trait]
impl DatasetStore for JsonFileStore {
    async fn load(&self) -> Result<Dataset, StorageError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.initialize().await,
            Err(e) => return self.recover(e.into()),
        };

        match serde_json::from_slice::<Dataset>(&content) {
            Ok(dataset) => {
                debug!(
                    "Loaded {} athletes from {}",
                    dataset.athletes.len(),
                    self.path.display()
                );
                Ok(dataset)
            }
            Err(e) => self.recover(e.into()),
        }
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_vec_pretty(dataset)?;
        tokio::fs::write(&self.path, content).await?;
        debug!(
            "Saved {} athletes to {}",
            dataset.athletes.len(),
            self.path.display()
        );
        Ok(())
    }
}
