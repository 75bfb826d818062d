//! Keyed JSON storage area, the extension `storage.local` analog.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A durable, string-keyed value file shared by the popup's stores.
///
/// Reads tolerate a missing file; every write rewrites the whole file. Two
/// open UI surfaces can race on it and the last write wins, which matches
/// the storage area the extension platform provides. No locking.
#[derive(Debug, Clone)]
pub struct StorageArea {
    path: PathBuf,
}

impl StorageArea {
    /// Open the default storage area under the platform data directory.
    pub fn open_default() -> StorageResult<Self> {
        let base = dirs::data_local_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no local data directory")
        })?;
        Ok(Self::at_path(base.join("snip").join("storage.json")))
    }

    /// Open a storage area backed by a specific file.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.read_map()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_map(&map)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn read_map(&self) -> StorageResult<Map<String, Value>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}
