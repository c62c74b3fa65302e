use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::domains::csv::filename::ExportFileNameBuilder;
use crate::domains::csv::mapping::CsvMapping;
use crate::domains::storage::StorageTarget;

pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_FILE_NAME_DATE_TIME_FORMAT: &str = "%Y%m%d%H%M%S";
pub const DEFAULT_COLUMN_DELIMITER: &str = "|";

/// Parameters for a single serialize-and-write operation. Created once per
/// exporter invocation and read-only from then on.
#[derive(Clone)]
pub struct ExporterOptions {
    pub as_of_date: DateTime<Utc>,
    pub targets: Vec<StorageTarget>,
    pub export_file_prefix: String,
    pub date_time_format: String,
    pub column_delimiter: String,
    pub file_name_date_time_format: String,
    pub custom_file_name_builder: Option<Arc<dyn ExportFileNameBuilder>>,
}

impl ExporterOptions {
    pub fn new(
        as_of_date: DateTime<Utc>,
        targets: Vec<StorageTarget>,
        export_file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            as_of_date,
            targets,
            export_file_prefix: export_file_prefix.into(),
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            column_delimiter: DEFAULT_COLUMN_DELIMITER.to_string(),
            file_name_date_time_format: DEFAULT_FILE_NAME_DATE_TIME_FORMAT.to_string(),
            custom_file_name_builder: None,
        }
    }

    pub fn with_column_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.column_delimiter = delimiter.into();
        self
    }

    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = format.into();
        self
    }

    pub fn with_file_name_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.file_name_date_time_format = format.into();
        self
    }

    pub fn with_custom_file_name_builder(
        mut self,
        builder: Arc<dyn ExportFileNameBuilder>,
    ) -> Self {
        self.custom_file_name_builder = Some(builder);
        self
    }

    /// JSON rendering for log lines; the filename builder is elided since
    /// closures have no useful textual form.
    pub fn to_log_json(&self) -> String {
        json!({
            "asOfDate": self.as_of_date,
            "targets": self.targets,
            "exportFilePrefix": self.export_file_prefix,
            "columnDelimiter": self.column_delimiter,
        })
        .to_string()
    }
}

/// Low-level serialization settings derived from [`ExporterOptions`].
#[derive(Debug, Clone)]
pub struct CsvSettings {
    pub delimiter: u8,
    pub has_header_record: bool,
    pub trim_inside_quotes: bool,
    pub date_time_format: String,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: b'|',
            has_header_record: true,
            trim_inside_quotes: true,
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}

/// The resolved per-type serialization plan: where to write, under what name,
/// with which settings and column mapping. Built fresh per export call.
pub struct CsvExportConfiguration<T> {
    pub targets: Vec<StorageTarget>,
    pub file_name: String,
    pub settings: CsvSettings,
    pub mapping: Arc<CsvMapping<T>>,
}
