use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domains::storage::target::{CsvStorageTarget, StorageTargetKind};
use crate::errors::{StorageError, StorageResult};

/// Writes export files to a directory on the local filesystem, creating the
/// directory tree on demand.
pub struct LocalDiskCsvStorageTarget;

impl LocalDiskCsvStorageTarget {
    pub fn new() -> Self {
        Self
    }

    fn file_path(target_location: &str, file_name: &str) -> StorageResult<PathBuf> {
        // File names are computed by the filename builder; reject anything
        // that would escape the target directory.
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(StorageError::InvalidPathComponent(file_name.to_string()));
        }
        Ok(Path::new(target_location).join(file_name))
    }
}

impl Default for LocalDiskCsvStorageTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CsvStorageTarget for LocalDiskCsvStorageTarget {
    fn kind(&self) -> StorageTargetKind {
        StorageTargetKind::LocalDisk
    }

    async fn write(
        &self,
        target_location: &str,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<()> {
        let path = Self::file_path(target_location, file_name)?;
        fs::create_dir_all(target_location).await?;
        fs::write(&path, content).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        match fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_exists_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("exports");
        let location = location.to_str().unwrap();
        let target = LocalDiskCsvStorageTarget::new();

        target
            .write(location, "Sample20190131000000.csv", b"a|b\n1|2\n")
            .await
            .unwrap();

        let written = format!("{}/Sample20190131000000.csv", location);
        assert!(target.exists(&written).await.unwrap());
        assert_eq!(std::fs::read(&written).unwrap(), b"a|b\n1|2\n");
    }

    #[tokio::test]
    async fn exists_is_false_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let target = LocalDiskCsvStorageTarget::new();

        assert!(!target.exists(missing.to_str().unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn write_rejects_path_traversal_in_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = LocalDiskCsvStorageTarget::new();

        let result = target
            .write(dir.path().to_str().unwrap(), "../escape.csv", b"x")
            .await;

        assert!(matches!(
            result,
            Err(StorageError::InvalidPathComponent(_))
        ));
    }
}
