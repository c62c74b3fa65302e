pub mod group;
pub mod group_item;
pub mod group_view;
pub mod notifications;
pub mod registry;
pub mod runner;
pub mod single;
pub mod types;

pub use group::{CsvStorageGroupExporter, GroupExportPlan};
pub use group_item::{CsvStorageGroupItemExporter, GroupItemExporter, GroupItemSource};
pub use group_view::{CsvStorageGroupViewExporter, ViewExportResult, ViewSource};
pub use notifications::{
    ExportNotification, FailNotification, ReportNotifier, ReportNotifierBuilder,
    SuccessNotification, WebHookNotifierBuilder, WebHookReportNotifier,
};
pub use registry::ExporterRegistry;
pub use runner::{ExportAgent, ExportOperation, Exporter};
pub use single::{CsvStorageExporter, EntitySource};
pub use types::{
    ExportExecutionContext, ExportExecutionResult, ExportMetadata, DEFAULT_CRON_SCHEDULE,
};
