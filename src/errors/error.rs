use thiserror::Error;
use uuid::Uuid;

use crate::domains::storage::StorageTargetKind;

/// A single storage target's terminal outcome after the write pipeline has
/// given up on it.
#[derive(Debug, Error)]
pub enum StorageTargetFailure {
    #[error("The export storage for {0} is not found. Make sure it has been registered in the storage target resolver")]
    NotFound(StorageTargetKind),

    #[error("Error in writing file to {kind} target '{location}': {reason}")]
    WriteFailed {
        kind: StorageTargetKind,
        location: String,
        reason: String,
    },
}

/// Aggregate failure of a multi-target write. Carries every target's
/// underlying failure, not just the first one.
#[derive(Debug, Error)]
#[error("Error in writing the file to multiple storage. {}", format_failures(.failures))]
pub struct StorageTargetError {
    pub failures: Vec<StorageTargetFailure>,
}

impl StorageTargetError {
    pub fn new(failures: Vec<StorageTargetFailure>) -> Self {
        Self { failures }
    }
}

fn format_failures(failures: &[StorageTargetFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path component: {0}")]
    InvalidPathComponent(String),

    #[error("Storage error: {0}")]
    Other(String),
}

/// Errors crossing a component boundary during an export run. Recoverable
/// data conditions (empty input, missing mapping) are reported as failed
/// `ExportResult`s instead and never surface here.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0}")]
    StorageTarget(#[from] StorageTargetError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Registry lookup errors, surfaced synchronously to the caller of `build`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No valid exporter was found for export with id: {0}")]
    ExporterNotFound(Uuid),
}

/// Exporter client configuration and transport errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Duplicate exporter with name {0} exists in the cache")]
    DuplicateExporter(String),

    #[error("The url {0} is not well formed")]
    InvalidUrlFormat(String),

    #[error("No exporter found with name: {0}. The {0} should be added using add_client in configuration")]
    ExporterNotFound(String),

    #[error("Exporter API error: {0}")]
    Api(String),
}
