use async_trait::async_trait;

use crate::core::Result;

/// Key-value storage backend - one string value per key.
///
/// Mirrors the browser's persistent key-value storage: whole values are read and
/// replaced, never patched. Implementations must make a single `set` appear
/// atomic to readers.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
