//! Key-value storage backends.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, Storage, check_key};

/// Stores each key as `{dir}/{key}.json`.
///
/// Writes go to a temporary sibling file first and are renamed into place, so
/// a crash mid-write never leaves a truncated collection behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        check_key(key)?;

        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        check_key(key)?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Storage entry written");
        Ok(())
    }
}

/// In-memory backend. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        check_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        check_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.get("fleetUser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_storage_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set("fleetUser", "[]").await.unwrap();
        assert_eq!(storage.get("fleetUser").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/fleetUser.json").exists());

        storage.set("fleetUser", "[1]").await.unwrap();
        assert_eq!(storage.get("fleetUser").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let err = storage.set("../escape", "x").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_memory_storage_keys_are_independent() {
        let storage = MemoryStorage::new();

        storage.set("a", "one").await.unwrap();
        storage.set("b", "two").await.unwrap();

        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("one"));
        assert_eq!(storage.get("b").await.unwrap().as_deref(), Some("two"));
        assert!(storage.get("c").await.unwrap().is_none());
    }
}
