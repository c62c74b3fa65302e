use std::collections::HashMap;
use std::sync::Arc;

use crate::domains::storage::target::{CsvStorageTarget, StorageTargetKind};

/// Maps a storage target kind to the registered backend instance. Built once
/// from the set of available backends; lookups are read-only afterwards.
pub struct CsvStorageTargetResolver {
    targets: HashMap<StorageTargetKind, Arc<dyn CsvStorageTarget>>,
}

impl CsvStorageTargetResolver {
    pub fn new(targets: Vec<Arc<dyn CsvStorageTarget>>) -> Self {
        let targets = targets.into_iter().map(|t| (t.kind(), t)).collect();
        Self { targets }
    }

    pub fn resolve(&self, kind: StorageTargetKind) -> Option<Arc<dyn CsvStorageTarget>> {
        self.targets.get(&kind).cloned()
    }
}
