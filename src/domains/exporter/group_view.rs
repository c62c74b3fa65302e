use async_trait::async_trait;
use log::info;
use std::any::TypeId;
use std::sync::Arc;

use crate::domains::csv::config::ExporterOptions;
use crate::domains::csv::exporter::FileExporter;
use crate::domains::csv::result::ExportResult;
use crate::domains::exporter::group_item::GroupItemExporter;
use crate::domains::storage::StorageTarget;
use crate::errors::ExportError;
use crate::utils::{short_type_name, type_label};

/// One schema's slice of a view scan.
#[derive(Debug, Clone)]
pub struct ViewExportResult<T> {
    pub schema: String,
    pub view_name: String,
    pub data: Option<Vec<T>>,
}

/// Supplies the schema list and per-schema data for a view-scanning child
/// exporter.
#[async_trait]
pub trait ViewSource<T>: Send + Sync {
    /// Schema names to scan for the view, in scan order.
    fn schemas(&self) -> Vec<String>;

    fn view_prefix(&self) -> &str;

    /// Load one schema's data for the view. `None` (or a result without
    /// data) drops that schema from the run.
    async fn prepare_data(
        &self,
        view_prefix: &str,
        schema: &str,
        view_name: &str,
        options: &ExporterOptions,
    ) -> Result<Option<ViewExportResult<T>>, ExportError>;

    /// Hook to derive per-schema options; the group's options are reused
    /// when this returns `None`.
    fn exporter_options(
        &self,
        _options: &ExporterOptions,
        _result: &ViewExportResult<T>,
    ) -> Option<ExporterOptions> {
        None
    }
}

/// Child exporter that scans a same-named view across multiple schemas and
/// merges the per-schema writes into one result. A successful run reports
/// the number of schemas that returned data, not the total row count.
pub struct CsvStorageGroupViewExporter<T> {
    source: Arc<dyn ViewSource<T>>,
    file_exporter: Arc<dyn FileExporter<T>>,
}

impl<T> CsvStorageGroupViewExporter<T> {
    pub fn new(source: Arc<dyn ViewSource<T>>, file_exporter: Arc<dyn FileExporter<T>>) -> Self {
        Self {
            source,
            file_exporter,
        }
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> GroupItemExporter for CsvStorageGroupViewExporter<T> {
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

        let view_name = short_type_name::<T>();
        let view_prefix = self.source.view_prefix().to_string();

        let mut results = Vec::new();
        for schema in self.source.schemas() {
            let result = self
                .source
                .prepare_data(&view_prefix, &schema, view_name, options)
                .await?;
            if let Some(result) = result {
                if result.data.is_some() {
                    results.push(result);
                }
            }
        }

        if results.is_empty() {
            return Ok(ExportResult::fail_with_file(
                "Invalid data from the source.",
                view_name,
            ));
        }

        let mut file_export_results = Vec::with_capacity(results.len());
        for result in &results {
            let Some(rows) = result.data.as_deref() else {
                continue;
            };

            info!(
                "Exporting {} {} in the list. export context: {}",
                rows.len(),
                type_label::<T>(),
                options.to_log_json()
            );

            let schema_options = self
                .source
                .exporter_options(options, result)
                .unwrap_or_else(|| options.clone());

            file_export_results
                .push(self.file_exporter.export(rows, &schema_options).await);
        }

        if file_export_results.iter().any(|r| r.has_error) {
            Ok(ExportResult::fail_with_file(
                "Invalid data from the source.",
                view_name,
            ))
        } else {
            Ok(ExportResult::success("", results.len()))
        }
    }
}
