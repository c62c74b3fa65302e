pub mod client;
pub mod csv;
pub mod exporter;
pub mod storage;

pub use csv::{CsvFileExporter, CsvFileWriter, ExportResult, ExporterOptions};
pub use exporter::{ExportAgent, Exporter, ExporterRegistry};
pub use storage::{StorageTarget, StorageTargetKind};
