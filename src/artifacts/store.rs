use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Read-only key→object lookup over serialized artifacts
pub trait ArtifactStore: Send + Sync {
    /// Load the raw bytes of one artifact by key
    fn get_raw(&self, key: &str) -> Result<Vec<u8>>;
}

/// Deserialize one artifact from a store
pub fn load_artifact<T: DeserializeOwned>(store: &dyn ArtifactStore, key: &str) -> Result<T> {
    let bytes = store.get_raw(key)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::ModelLoad(format!("artifact '{}' is corrupt: {}", key, e)))
}

/// Filesystem-backed artifact store: one JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactStore for FsArtifactStore {
    fn get_raw(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(key);
        std::fs::read(&path).map_err(|e| {
            AppError::ModelLoad(format!("artifact '{}' unreadable: {}", path.display(), e))
        })
    }
}
