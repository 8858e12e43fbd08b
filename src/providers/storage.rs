//! Durable key-value byte storage for serialized index records

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Trait for persisting serialized index records keyed by document key
///
/// Implementations:
/// - `FsIndexStorage`: one file per key under a root directory
/// - `MemoryIndexStorage`: in-process map, for tests and ephemeral use
#[async_trait]
pub trait IndexStorage: Send + Sync {
    /// Store a record, replacing any existing record under the key
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Fetch a record; `None` when the key has never been stored
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a record; returns whether a record existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Filesystem-backed index storage
///
/// Keys are used as file stems, so callers must supply filesystem-safe
/// tokens (the pipeline's document keys are filename tokens already).
pub struct FsIndexStorage {
    root: PathBuf,
}

impl FsIndexStorage {
    /// Create a storage rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(Error::storage(format!("invalid document key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.index.json")))
    }
}

#[async_trait]
impl IndexStorage for FsIndexStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "fs"
    }
}

/// In-memory index storage
#[derive(Default)]
pub struct MemoryIndexStorage {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryIndexStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IndexStorage for MemoryIndexStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.records.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.read().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.records.write().remove(key).is_some())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn fs_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsIndexStorage::new(dir.path()).unwrap();

        assert!(storage.get("doc1").await.unwrap().is_none());
        storage.put("doc1", b"payload").await.unwrap();
        assert_eq!(storage.get("doc1").await.unwrap().unwrap(), b"payload");
        assert!(storage.delete("doc1").await.unwrap());
        assert!(!storage.delete("doc1").await.unwrap());
    }

    #[tokio::test]
    async fn fs_storage_rejects_path_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsIndexStorage::new(dir.path()).unwrap();

        assert!(storage.get("../escape").await.is_err());
        assert!(storage.put("a/b", b"x").await.is_err());
    }

    #[tokio::test]
    async fn memory_storage_round_trip() {
        let storage = MemoryIndexStorage::new();
        tokio_test::assert_ok!(storage.put("k", b"v").await);
        assert_eq!(storage.get("k").await.unwrap().unwrap(), b"v");
        assert!(storage.delete("k").await.unwrap());
        assert!(storage.get("k").await.unwrap().is_none());
    }
}
