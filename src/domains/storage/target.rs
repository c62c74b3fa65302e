use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::StorageResult;

pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Kinds of destination an export file can be delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageTargetKind {
    LocalDisk,
    InMemory,
    S3Bucket,
    BlobStorage,
}

impl fmt::Display for StorageTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageTargetKind::LocalDisk => "LocalDisk",
            StorageTargetKind::InMemory => "InMemory",
            StorageTargetKind::S3Bucket => "S3Bucket",
            StorageTargetKind::BlobStorage => "BlobStorage",
        };
        write!(f, "{}", name)
    }
}

/// A single write destination: where the serialized file goes and how patient
/// the writer should be with it. `retry_delay_secs` is the base of the
/// exponential backoff (delay, 2x, 4x) between write attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageTarget {
    pub target_location: String,
    pub kind: StorageTargetKind,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

fn default_retry_delay() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

impl StorageTarget {
    pub fn new(target_location: impl Into<String>, kind: StorageTargetKind) -> Self {
        Self {
            target_location: target_location.into(),
            kind,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay_secs: u64) -> Self {
        self.retry_delay_secs = retry_delay_secs;
        self
    }
}

/// Capability contract a storage backend must satisfy to receive export
/// files. Implementations are registered with the resolver by kind.
#[async_trait]
pub trait CsvStorageTarget: Send + Sync {
    fn kind(&self) -> StorageTargetKind;

    /// Write `content` as `file_name` under `target_location`.
    async fn write(
        &self,
        target_location: &str,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<()>;

    /// Check whether a previously written file is present.
    async fn exists(&self, path: &str) -> StorageResult<bool>;
}
