use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::domains::storage::target::{CsvStorageTarget, StorageTargetKind};
use crate::errors::StorageResult;

/// Byte-level blob contract satisfied by external object/blob backends
/// (S3 clients, Azure blob clients). The export pipeline only ever needs
/// these two operations from them.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()>;
    async fn exists(&self, path: &str) -> StorageResult<bool>;
}

/// Adapts an externally supplied blob store into a storage target of a
/// caller-chosen kind. This is the vehicle for `S3Bucket` and `BlobStorage`
/// destinations without the core depending on any vendor SDK.
pub struct GenericCsvStorageTarget {
    kind: StorageTargetKind,
    store: Arc<dyn BlobStorage>,
}

impl GenericCsvStorageTarget {
    pub fn new(kind: StorageTargetKind, store: Arc<dyn BlobStorage>) -> Self {
        Self { kind, store }
    }
}

#[async_trait]
impl CsvStorageTarget for GenericCsvStorageTarget {
    fn kind(&self) -> StorageTargetKind {
        self.kind
    }

    async fn write(
        &self,
        target_location: &str,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<()> {
        let path = Path::new(target_location).join(file_name);
        self.store.write(&path.to_string_lossy(), content).await
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        self.store.exists(path).await
    }
}
