use log::warn;
use std::sync::Arc;

use crate::domains::csv::config::{CsvExportConfiguration, CsvSettings, ExporterOptions};
use crate::domains::csv::filename::ExportFileNameBuilder;
use crate::domains::csv::mapping::CsvMappingRegistry;
use crate::utils::type_label;

/// Resolves the registered mapping for an entity type and turns a set of
/// exporter options into a ready-to-run serialization plan. A missing
/// mapping is the designed soft-fail signal: `None`, never an error.
pub struct CsvExportConfigurationBuilder {
    mapping_registry: Arc<CsvMappingRegistry>,
    file_name_builder: Arc<dyn ExportFileNameBuilder>,
}

impl CsvExportConfigurationBuilder {
    pub fn new(
        mapping_registry: Arc<CsvMappingRegistry>,
        file_name_builder: Arc<dyn ExportFileNameBuilder>,
    ) -> Self {
        Self {
            mapping_registry,
            file_name_builder,
        }
    }

    pub fn build<T: 'static>(
        &self,
        options: &ExporterOptions,
    ) -> Option<CsvExportConfiguration<T>> {
        let Some(mapping) = self.mapping_registry.resolve::<T>() else {
            warn!("Unable to get CSV mapping for type {}", type_label::<T>());
            return None;
        };

        let file_name_builder = options
            .custom_file_name_builder
            .as_deref()
            .unwrap_or(self.file_name_builder.as_ref());

        let settings = CsvSettings {
            delimiter: options.column_delimiter.bytes().next().unwrap_or(b'|'),
            has_header_record: true,
            trim_inside_quotes: true,
            date_time_format: options.date_time_format.clone(),
        };

        Some(CsvExportConfiguration {
            targets: options.targets.clone(),
            file_name: file_name_builder.build(options),
            settings,
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::csv::filename::DateBasedExportFileNameBuilder;
    use crate::domains::csv::mapping::CsvMapping;
    use crate::domains::storage::{StorageTarget, StorageTargetKind};
    use chrono::{TimeZone, Utc};

    struct SampleEntity {
        name: String,
    }

    fn builder_with_sample_mapping() -> CsvExportConfigurationBuilder {
        let registry = CsvMappingRegistry::new();
        registry.register(CsvMapping::new().column("Name", |e: &SampleEntity| e.name.clone()));
        CsvExportConfigurationBuilder::new(
            Arc::new(registry),
            Arc::new(DateBasedExportFileNameBuilder),
        )
    }

    fn sample_options() -> ExporterOptions {
        let as_of = Utc.with_ymd_and_hms(2019, 1, 31, 0, 0, 0).unwrap();
        ExporterOptions::new(
            as_of,
            vec![StorageTarget::new("mem", StorageTargetKind::InMemory)],
            "Sample",
        )
    }

    #[test]
    fn build_produces_configuration_for_registered_type() {
        let builder = builder_with_sample_mapping();

        let configuration = builder.build::<SampleEntity>(&sample_options()).unwrap();

        assert_eq!(configuration.file_name, "Sample20190131000000.csv");
        assert_eq!(configuration.targets.len(), 1);
        assert_eq!(configuration.settings.delimiter, b'|');
        assert!(configuration.settings.has_header_record);
        assert!(configuration.settings.trim_inside_quotes);
    }

    #[test]
    fn build_returns_none_without_mapping() {
        let builder = CsvExportConfigurationBuilder::new(
            Arc::new(CsvMappingRegistry::new()),
            Arc::new(DateBasedExportFileNameBuilder),
        );

        assert!(builder.build::<SampleEntity>(&sample_options()).is_none());
    }

    #[test]
    fn build_honors_custom_delimiter_and_file_name_builder() {
        struct FixedName;
        impl ExportFileNameBuilder for FixedName {
            fn build(&self, _options: &ExporterOptions) -> String {
                "fixed.csv".to_string()
            }
        }

        let builder = builder_with_sample_mapping();
        let options = sample_options()
            .with_column_delimiter(";")
            .with_custom_file_name_builder(Arc::new(FixedName));

        let configuration = builder.build::<SampleEntity>(&options).unwrap();

        assert_eq!(configuration.file_name, "fixed.csv");
        assert_eq!(configuration.settings.delimiter, b';');
    }
}
