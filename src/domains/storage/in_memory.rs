use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domains::storage::target::{CsvStorageTarget, StorageTargetKind};
use crate::errors::StorageResult;

/// Keeps export files in process memory, keyed by `{location}/{file_name}`.
/// Useful for dry runs and as a lightweight target in tests.
pub struct InMemoryCsvStorageTarget {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryCsvStorageTarget {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    fn file_key(target_location: &str, file_name: &str) -> String {
        format!("{}/{}", target_location.trim_end_matches('/'), file_name)
    }

    /// Retrieve a stored file's content.
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(path).cloned()
    }

    /// Paths of every file written so far.
    pub async fn file_names(&self) -> Vec<String> {
        self.files.read().await.keys().cloned().collect()
    }
}

impl Default for InMemoryCsvStorageTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CsvStorageTarget for InMemoryCsvStorageTarget {
    fn kind(&self) -> StorageTargetKind {
        StorageTargetKind::InMemory
    }

    async fn write(
        &self,
        target_location: &str,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<()> {
        let key = Self::file_key(target_location, file_name);
        self.files.write().await.insert(key, content.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.files.read().await.contains_key(path))
    }
}
