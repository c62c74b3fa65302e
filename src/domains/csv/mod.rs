pub mod builder;
pub mod config;
pub mod exporter;
pub mod filename;
pub mod mapping;
pub mod result;
pub mod writer;

pub use builder::CsvExportConfigurationBuilder;
pub use config::{
    CsvExportConfiguration, CsvSettings, ExporterOptions, DEFAULT_COLUMN_DELIMITER,
    DEFAULT_DATE_TIME_FORMAT, DEFAULT_FILE_NAME_DATE_TIME_FORMAT,
};
pub use exporter::{CsvFileExporter, FileExporter};
pub use filename::{DateBasedExportFileNameBuilder, ExportFileNameBuilder};
pub use mapping::{CsvMapping, CsvMappingRegistry};
pub use result::ExportResult;
pub use writer::CsvFileWriter;
