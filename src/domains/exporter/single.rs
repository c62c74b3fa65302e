use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::domains::csv::config::ExporterOptions;
use crate::domains::csv::exporter::FileExporter;
use crate::domains::csv::result::ExportResult;
use crate::domains::exporter::runner::ExportOperation;
use crate::domains::exporter::types::ExportExecutionContext;
use crate::domains::storage::StorageTarget;
use crate::errors::ExportError;
use crate::utils::{short_type_name, to_json, type_label};

/// Supplies the dataset and file naming for a single-entity export.
#[async_trait]
pub trait EntitySource<T>: Send + Sync {
    /// Load the dataset for the run. `None` means the source had nothing
    /// valid to offer and the run must fail.
    async fn prepare_data(
        &self,
        context: &ExportExecutionContext,
    ) -> Result<Option<Vec<T>>, ExportError>;

    fn export_file_prefix(&self) -> &str;

    /// Hook for sources that want to tune options per run; the default
    /// options are used when this returns `None`.
    fn exporter_options(
        &self,
        _context: &ExportExecutionContext,
        _storage_targets: &[StorageTarget],
        _data: &[T],
    ) -> Option<ExporterOptions> {
        None
    }
}

/// Single-dataset export operation: load, build options, delegate to the
/// file exporter.
pub struct CsvStorageExporter<T> {
    name: String,
    source: Arc<dyn EntitySource<T>>,
    file_exporter: Arc<dyn FileExporter<T>>,
}

impl<T> CsvStorageExporter<T> {
    pub fn new(source: Arc<dyn EntitySource<T>>, file_exporter: Arc<dyn FileExporter<T>>) -> Self {
        Self {
            name: format!("CsvStorageExporter<{}>", short_type_name::<T>()),
            source,
            file_exporter,
        }
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> ExportOperation for CsvStorageExporter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        context: &ExportExecutionContext,
        storage_targets: &[StorageTarget],
    ) -> Result<ExportResult, ExportError> {
        info!(
            "Loading the list of {}. export context: {}",
            type_label::<T>(),
            to_json(context)
        );

        let Some(data) = self.source.prepare_data(context).await? else {
            return Ok(ExportResult::fail("Invalid data from the source."));
        };

        info!(
            "Exporting {} {} in the list. export context: {}",
            data.len(),
            type_label::<T>(),
            to_json(context)
        );

        let options = self
            .source
            .exporter_options(context, storage_targets, &data)
            .unwrap_or_else(|| {
                ExporterOptions::new(
                    context.as_of_date,
                    storage_targets.to_vec(),
                    self.source.export_file_prefix(),
                )
            });

        Ok(self.file_exporter.export(&data, &options).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    struct FixedSource {
        data: Option<Vec<String>>,
    }

    #[async_trait]
    impl EntitySource<String> for FixedSource {
        async fn prepare_data(
            &self,
            _context: &ExportExecutionContext,
        ) -> Result<Option<Vec<String>>, ExportError> {
            Ok(self.data.clone())
        }

        fn export_file_prefix(&self) -> &str {
            "Holdings"
        }
    }

    /// Captures what the operation hands to the file pipeline.
    struct RecordingFileExporter {
        calls: Mutex<Vec<(usize, String)>>,
        result: ExportResult,
    }

    impl RecordingFileExporter {
        fn succeeding() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                result: ExportResult::success("Holdings20210601000000.csv", 3),
            }
        }
    }

    #[async_trait]
    impl FileExporter<String> for RecordingFileExporter {
        async fn export(&self, items: &[String], options: &ExporterOptions) -> ExportResult {
            self.calls
                .lock()
                .unwrap()
                .push((items.len(), options.export_file_prefix.clone()));
            self.result.clone()
        }
    }

    fn sample_context() -> ExportExecutionContext {
        ExportExecutionContext::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap(),
            "https://callbacks/success",
            "https://callbacks/fail",
        )
    }

    #[tokio::test]
    async fn missing_data_fails_without_touching_the_file_exporter() {
        let file_exporter = Arc::new(RecordingFileExporter::succeeding());
        let operation = CsvStorageExporter::new(
            Arc::new(FixedSource { data: None }),
            file_exporter.clone(),
        );

        let result = operation.execute(&sample_context(), &[]).await.unwrap();

        assert!(result.has_error);
        assert_eq!(result.error.as_deref(), Some("Invalid data from the source."));
        assert!(file_exporter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn data_is_exported_with_default_options() {
        let file_exporter = Arc::new(RecordingFileExporter::succeeding());
        let operation = CsvStorageExporter::new(
            Arc::new(FixedSource {
                data: Some(vec!["a".into(), "b".into(), "c".into()]),
            }),
            file_exporter.clone(),
        );

        let result = operation.execute(&sample_context(), &[]).await.unwrap();

        assert!(!result.has_error);
        let calls = file_exporter.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(3, "Holdings".to_string())]);
    }

    #[test]
    fn operation_name_carries_the_entity_type() {
        let operation = CsvStorageExporter::new(
            Arc::new(FixedSource { data: None }),
            Arc::new(RecordingFileExporter::succeeding()),
        );

        assert_eq!(operation.name(), "CsvStorageExporter<String>");
    }
}
