//! File-backed key-value storage: one file per key under a data directory.

use super::StorageBackend;
use crate::core::{NemesiaError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            NemesiaError::storage(format!(
                "Failed to create storage directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(NemesiaError::storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NemesiaError::storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write to a uniquely named temp file in the same directory, sync it,
    /// then rename it over the target. Concurrent writers never share a temp
    /// file, and readers see either the old or the new value.
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let root = self.root.clone();
        let key = key.to_string();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut file = tempfile::Builder::new()
                .prefix(&format!(".{key}."))
                .suffix(".tmp")
                .tempfile_in(&root)
                .map_err(|e| NemesiaError::storage(format!("Failed to create temp file: {}", e)))?;
            file.write_all(value.as_bytes())
                .map_err(|e| NemesiaError::storage(format!("Failed to write '{}': {}", key, e)))?;
            file.as_file()
                .sync_all()
                .map_err(|e| NemesiaError::storage(format!("Failed to sync '{}': {}", key, e)))?;
            // on failure the temp file is dropped and deleted
            file.persist(&path).map_err(|e| {
                NemesiaError::storage(format!("Failed to rename '{}': {}", key, e.error))
            })?;
            Ok(())
        })
        .await
        .map_err(|e| NemesiaError::storage(format!("Write task failed: {}", e)))?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NemesiaError::storage(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("data")).await.unwrap();

        assert_eq!(storage.get("nemesia_db_v1").await.unwrap(), None);
        storage.set("nemesia_db_v1", "{\"a\":1}").await.unwrap();
        assert_eq!(
            storage.get("nemesia_db_v1").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(std::fs::read_dir(storage.root()).unwrap().count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_on_one_directory() {
        let temp_dir = TempDir::new().unwrap();
        let a = std::sync::Arc::new(FileStorage::open(temp_dir.path()).await.unwrap());
        let b = std::sync::Arc::new(FileStorage::open(temp_dir.path()).await.unwrap());

        let mut handles = vec![];
        for i in 0..20 {
            let storage = if i % 2 == 0 { a.clone() } else { b.clone() };
            handles.push(tokio::spawn(async move {
                storage.set("doc", &format!("value-{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let value = a.get("doc").await.unwrap().unwrap();
        let written: Vec<_> = (0..20).map(|i| format!("value-{i}")).collect();
        assert!(written.contains(&value), "unexpected value {value:?}");

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["doc.json".to_string()]);
    }

    #[tokio::test]
    async fn test_file_overwrite_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).await.unwrap();

        storage.set("k", "first").await.unwrap();
        storage.set("k", "second").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("second"));

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).await.unwrap();

        assert!(storage.set("../escape", "x").await.is_err());
        assert!(storage.get("a/b").await.is_err());
        assert!(storage.get("").await.is_err());
    }
}
