use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

use crate::domains::csv::builder::CsvExportConfigurationBuilder;
use crate::domains::csv::config::ExporterOptions;
use crate::domains::csv::result::ExportResult;
use crate::domains::csv::writer::CsvFileWriter;
use crate::utils::{to_json, type_label};

/// One serialize-and-write operation for a given entity type. Exporters hold
/// this as a trait object so tests can substitute the whole file pipeline.
#[async_trait]
pub trait FileExporter<T>: Send + Sync {
    async fn export(&self, items: &[T], options: &ExporterOptions) -> ExportResult;
}

/// Orchestrates one CSV export: validates the input, builds the per-type
/// configuration and hands the items to the writer. Every failure mode is
/// converted into a failed [`ExportResult`]; nothing escapes as an error.
pub struct CsvFileExporter {
    csv_file_writer: Arc<CsvFileWriter>,
    configuration_builder: Arc<CsvExportConfigurationBuilder>,
}

impl CsvFileExporter {
    pub fn new(
        csv_file_writer: Arc<CsvFileWriter>,
        configuration_builder: Arc<CsvExportConfigurationBuilder>,
    ) -> Self {
        Self {
            csv_file_writer,
            configuration_builder,
        }
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> FileExporter<T> for CsvFileExporter {
    async fn export(&self, items: &[T], options: &ExporterOptions) -> ExportResult {
        if items.is_empty() {
            let message = format!(
                "Export for {} has cancelled due to an empty list of items",
                type_label::<T>()
            );
            warn!("{}", message);

            return ExportResult::fail(message);
        }

        let Some(configuration) = self.configuration_builder.build::<T>(options) else {
            let message = format!(
                "Error in creating export configuration '{}'. Make sure the CSV mapping has been registered",
                type_label::<T>()
            );
            warn!("{}", message);

            return ExportResult::fail(message);
        };

        match self.csv_file_writer.write_file(items, &configuration).await {
            Ok(()) => {
                info!(
                    "File {} written for '{}' as of date {}",
                    configuration.file_name,
                    type_label::<T>(),
                    options.as_of_date
                );

                ExportResult::success(configuration.file_name, items.len())
            }
            Err(e) => {
                let message = format!(
                    "Error in exporting {} to target location {}",
                    type_label::<T>(),
                    to_json(&options.targets)
                );
                error!("{}. Reason: {}", message, e);

                ExportResult::fail(format!("{}. Reason: {}", message, e))
            }
        }
    }
}
