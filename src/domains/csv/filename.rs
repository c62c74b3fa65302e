use crate::domains::csv::config::ExporterOptions;

/// Strategy for naming the export file. The default is date based; callers
/// can inject their own through `ExporterOptions::custom_file_name_builder`.
pub trait ExportFileNameBuilder: Send + Sync {
    fn build(&self, options: &ExporterOptions) -> String;
}

/// `{prefix}{as-of date}.csv` with a fixed 14-digit timestamp segment.
pub struct DateBasedExportFileNameBuilder;

impl ExportFileNameBuilder for DateBasedExportFileNameBuilder {
    fn build(&self, options: &ExporterOptions) -> String {
        format!(
            "{}{}.csv",
            options.export_file_prefix,
            options
                .as_of_date
                .format(&options.file_name_date_time_format)
        )
    }
}
