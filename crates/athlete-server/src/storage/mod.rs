//! Storage layer
//!
//! The dataset is persisted as a single JSON document rewritten in full on
//! every mutation. Handlers only see the `DatasetStore` trait, so the
//! whole-file strategy can be swapped without touching request handling.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::anyhow;
use async_trait::async_trait;
use athlete_types::Dataset;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do when the dataset file exists but cannot be read or parsed.
///
/// A missing file is never an error under either policy: it is created
/// with an empty dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Propagate the failure
    #[default]
    Strict,
    /// Log a warning and continue with an empty dataset
    Recover,
}

impl FromStr for LoadPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(LoadPolicy::Strict),
            "recover" => Ok(LoadPolicy::Recover),
            other => Err(anyhow!("Unknown load policy: {}", other)),
        }
    }
}

/// Persistence adapter for the athlete dataset
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Read the full dataset
    async fn load(&self) -> Result<Dataset, StorageError>;

    /// Replace the stored dataset with `dataset`
    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError>;
}
