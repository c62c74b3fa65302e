use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domains::exporter::runner::Exporter;
use crate::domains::exporter::types::ExportMetadata;
use crate::errors::{RegistryError, RegistryResult};

type ExporterFactory = Arc<dyn Fn() -> Arc<dyn Exporter> + Send + Sync>;

struct ExporterRegistration {
    metadata: ExportMetadata,
    factory: ExporterFactory,
}

/// Process-wide map from export id to a runnable exporter factory plus its
/// descriptive metadata. Registration is an atomic upsert (last write wins)
/// and may race with lookups from build traffic.
pub struct ExporterRegistry {
    registry: RwLock<HashMap<Uuid, ExporterRegistration>>,
}

impl ExporterRegistry {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) the exporter for `metadata.export_id`. The
    /// factory is captured here and invoked on every [`build`](Self::build).
    pub fn register<F>(&self, metadata: ExportMetadata, factory: F)
    where
        F: Fn() -> Arc<dyn Exporter> + Send + Sync + 'static,
    {
        let key = metadata.export_id;
        let registration = ExporterRegistration {
            metadata,
            factory: Arc::new(factory),
        };

        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.insert(key, registration);
    }

    /// Resolve an export id to a runnable exporter instance.
    pub fn build(&self, export_id: Uuid) -> RegistryResult<Arc<dyn Exporter>> {
        let registry = self
            .registry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        registry
            .get(&export_id)
            .map(|registration| (registration.factory)())
            .ok_or(RegistryError::ExporterNotFound(export_id))
    }

    /// Snapshot of every registered export's metadata; ordering carries no
    /// meaning.
    pub fn get_registrations(&self) -> Vec<ExportMetadata> {
        let registry = self
            .registry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        registry.values().map(|r| r.metadata.clone()).collect()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
