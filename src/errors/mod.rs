mod error;

pub use error::{
    ClientError, ExportError, RegistryError, StorageError, StorageTargetError,
    StorageTargetFailure,
};

/// Result type for storage backend operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for registry lookups
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for exporter client operations
pub type ClientResult<T> = Result<T, ClientError>;
