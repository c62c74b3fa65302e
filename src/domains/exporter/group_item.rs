use async_trait::async_trait;
use log::info;
use std::any::TypeId;
use std::sync::Arc;

use crate::domains::csv::config::ExporterOptions;
use crate::domains::csv::exporter::FileExporter;
use crate::domains::csv::result::ExportResult;
use crate::domains::storage::StorageTarget;
use crate::errors::ExportError;
use crate::utils::{short_type_name, type_label};

/// A child exporter run as part of a group. It hands its result back to the
/// parent instead of notifying anyone itself.
#[async_trait]
pub trait GroupItemExporter: Send + Sync {
    /// Entity type this child exports; the group matches declared children
    /// against it.
    fn group_item_type(&self) -> TypeId;

    /// Readable form of the item type, for logging.
    fn group_item_type_name(&self) -> &'static str;

    async fn run(
        &self,
        options: &ExporterOptions,
        storage_targets: &[StorageTarget],
    ) -> Result<ExportResult, ExportError>;
}

/// Supplies the dataset and file naming for one group item.
#[async_trait]
pub trait GroupItemSource<T>: Send + Sync {
    async fn prepare_data(
        &self,
        options: &ExporterOptions,
    ) -> Result<Option<Vec<T>>, ExportError>;

    fn export_file_prefix(&self) -> &str;

    /// Hook to derive per-item options from the group's; the group's own
    /// options are reused when this returns `None`.
    fn exporter_options(&self, _options: &ExporterOptions) -> Option<ExporterOptions> {
        None
    }
}

/// Plain child exporter: same load-and-export shape as the single-entity
/// exporter, minus the notification tail.
pub struct CsvStorageGroupItemExporter<T> {
    source: Arc<dyn GroupItemSource<T>>,
    file_exporter: Arc<dyn FileExporter<T>>,
}

impl<T> CsvStorageGroupItemExporter<T> {
    pub fn new(
        source: Arc<dyn GroupItemSource<T>>,
        file_exporter: Arc<dyn FileExporter<T>>,
    ) -> Self {
        Self {
            source,
            file_exporter,
        }
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> GroupItemExporter for CsvStorageGroupItemExporter<T> {
    fn group_item_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn group_item_type_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    async fn run(
        &self,
        options: &ExporterOptions,
        _storage_targets: &[StorageTarget],
    ) -> Result<ExportResult, ExportError> {
        info!(
            "Loading the list of {}. export context: {}",
            type_label::<T>(),
            options.to_log_json()
        );

        let Some(data) = self.source.prepare_data(options).await? else {
            return Ok(ExportResult::fail_with_file(
                "Invalid data from the source.",
                self.source.export_file_prefix(),
            ));
        };

        info!(
            "Exporting {} {} in the list. export context: {}",
            data.len(),
            type_label::<T>(),
            options.to_log_json()
        );

        let item_options = self
            .source
            .exporter_options(options)
            .unwrap_or_else(|| options.clone());

        Ok(self.file_exporter.export(&data, &item_options).await)
    }
}
