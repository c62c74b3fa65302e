//! Batch CSV export framework.
//!
//! Datasets are serialized to CSV once and fanned out to any number of
//! storage targets (local disk, in-memory, object or blob storage) with
//! per-target retry; every run ends in a success or failure webhook
//! notification. Exporters come in three shapes: a single dataset, a group
//! of child exporters run together, and a view scanned across schemas.
//!
//! The building blocks compose explicitly:
//!
//! 1. register [`CsvMapping`](domains::csv::CsvMapping)s for the entity
//!    types to export,
//! 2. wire a [`CsvFileExporter`](domains::csv::CsvFileExporter) from a
//!    writer and a configuration builder,
//! 3. wrap an operation ([`CsvStorageExporter`](domains::exporter::CsvStorageExporter)
//!    or a group) in an [`ExportAgent`](domains::exporter::ExportAgent),
//! 4. register the agent in the [`ExporterRegistry`](domains::exporter::ExporterRegistry)
//!    for discovery and execution.

// Public modules
pub mod domains;
pub mod errors;

// Private modules
mod utils;

pub use domains::csv::{
    CsvExportConfigurationBuilder, CsvFileExporter, CsvFileWriter, CsvMapping,
    CsvMappingRegistry, DateBasedExportFileNameBuilder, ExportFileNameBuilder, ExportResult,
    ExporterOptions, FileExporter,
};
pub use domains::client::{ExporterClient, ExporterClientBuilder, RestExporterClient};
pub use domains::exporter::{
    CsvStorageExporter, CsvStorageGroupExporter, CsvStorageGroupItemExporter,
    CsvStorageGroupViewExporter, EntitySource, ExportAgent, ExportExecutionContext,
    ExportMetadata, ExportNotification, ExportOperation, Exporter, ExporterRegistry,
    FailNotification, GroupExportPlan, GroupItemExporter, GroupItemSource, ReportNotifier,
    ReportNotifierBuilder, SuccessNotification, ViewExportResult, ViewSource,
    WebHookNotifierBuilder, WebHookReportNotifier,
};
pub use domains::storage::{
    BlobStorage, CsvStorageTarget, CsvStorageTargetResolver, GenericCsvStorageTarget,
    InMemoryCsvStorageTarget, LocalDiskCsvStorageTarget, StorageTarget, StorageTargetKind,
};
pub use errors::{
    ClientError, ExportError, RegistryError, StorageError, StorageTargetError,
    StorageTargetFailure,
};
