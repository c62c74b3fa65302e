use async_trait::async_trait;
use futures::future::join_all;
use log::{error, info, warn};
use std::any::TypeId;
use std::sync::Arc;

use crate::domains::csv::config::ExporterOptions;
use crate::domains::csv::result::ExportResult;
use crate::domains::exporter::group_item::GroupItemExporter;
use crate::domains::exporter::runner::ExportOperation;
use crate::domains::exporter::types::ExportExecutionContext;
use crate::domains::storage::StorageTarget;
use crate::errors::ExportError;
use crate::utils::to_json;

/// Declares which children make up a group export and how the combined
/// metadata artifact is produced once they have all run.
#[async_trait]
pub trait GroupExportPlan: Send + Sync {
    /// The exact set of child item types this group expects at runtime.
    fn child_exporter_types(&self) -> Vec<TypeId>;

    fn export_file_prefix(&self) -> &str;

    /// Produce the combined metadata file name and record count from the
    /// children's results.
    async fn generate_export_metadata(
        &self,
        results: &[ExportResult],
        options: &ExporterOptions,
        storage_targets: &[StorageTarget],
    ) -> Result<(String, usize), ExportError>;

    /// Hook for plans that want to tune the options shared by the children.
    fn exporter_options(
        &self,
        _context: &ExportExecutionContext,
        _storage_targets: &[StorageTarget],
    ) -> Option<ExporterOptions> {
        None
    }
}

/// Runs a fixed set of child exporters together and reports them as one
/// unit. Fails fast when the runtime set of children does not match the
/// declared set; no child runs at all in that case.
pub struct CsvStorageGroupExporter {
    plan: Arc<dyn GroupExportPlan>,
    group_item_exporters: Vec<Arc<dyn GroupItemExporter>>,
}

impl CsvStorageGroupExporter {
    pub fn new(
        plan: Arc<dyn GroupExportPlan>,
        group_item_exporters: Vec<Arc<dyn GroupItemExporter>>,
    ) -> Self {
        Self {
            plan,
            group_item_exporters,
        }
    }
}

#[async_trait]
impl ExportOperation for CsvStorageGroupExporter {
    fn name(&self) -> &str {
        "CsvStorageGroupExporter"
    }

    async fn execute(
        &self,
        context: &ExportExecutionContext,
        storage_targets: &[StorageTarget],
    ) -> Result<ExportResult, ExportError> {
        info!(
            "Exporting the group data. export context: {}",
            to_json(context)
        );

        let expected = self.plan.child_exporter_types();
        let children: Vec<_> = self
            .group_item_exporters
            .iter()
            .filter(|e| expected.contains(&e.group_item_type()))
            .collect();

        let export_types = children
            .iter()
            .map(|e| e.group_item_type_name())
            .collect::<Vec<_>>()
            .join(",");
        info!(
            "Exporting the data for {}. export context: {}",
            export_types,
            to_json(context)
        );

        if children.len() != expected.len() {
            let message = format!(
                "Missing exporters from runtime. Expecting {}, Found {}",
                expected.len(),
                children.len()
            );
            warn!("{}", message);

            return Ok(ExportResult::fail(message));
        }

        let options = self
            .plan
            .exporter_options(context, storage_targets)
            .unwrap_or_else(|| {
                ExporterOptions::new(
                    context.as_of_date,
                    storage_targets.to_vec(),
                    self.plan.export_file_prefix(),
                )
            });

        let outcomes = join_all(
            children
                .iter()
                .map(|e| e.run(&options, storage_targets)),
        )
        .await;

        // A child's transport error fails the whole group with run context;
        // data-level failures stay in the results and are folded below.
        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    let message = format!(
                        "Error in generating the exports. export context: {}",
                        to_json(context)
                    );
                    error!("{}. Reason: {}", message, e);

                    return Ok(ExportResult::fail(message));
                }
            }
        }

        let (metadata_file, count) = match self
            .plan
            .generate_export_metadata(&results, &options, storage_targets)
            .await
        {
            Ok(metadata) => metadata,
            Err(e) => {
                let message = format!(
                    "Error in generating the exports. export context: {}",
                    to_json(context)
                );
                error!("{}. Reason: {}", message, e);

                return Ok(ExportResult::fail(message));
            }
        };

        if results.iter().all(|r| !r.has_error) {
            return Ok(ExportResult::success(metadata_file, count));
        }

        let errors = results
            .iter()
            .filter_map(|r| r.error.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ExportResult::fail(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct Trades;
    struct Rates;

    struct StubChild {
        item_type: TypeId,
        item_name: &'static str,
        outcome: Result<ExportResult, String>,
        runs: AtomicUsize,
    }

    impl StubChild {
        fn succeeding<T: 'static>(name: &'static str, count: usize) -> Self {
            Self {
                item_type: TypeId::of::<T>(),
                item_name: name,
                outcome: Ok(ExportResult::success(format!("{}.csv", name), count)),
                runs: AtomicUsize::new(0),
            }
        }

        fn failing<T: 'static>(name: &'static str, error: &str) -> Self {
            Self {
                item_type: TypeId::of::<T>(),
                item_name: name,
                outcome: Ok(ExportResult::fail(error)),
                runs: AtomicUsize::new(0),
            }
        }

        fn erroring<T: 'static>(name: &'static str, error: &str) -> Self {
            Self {
                item_type: TypeId::of::<T>(),
                item_name: name,
                outcome: Err(error.to_string()),
                runs: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GroupItemExporter for StubChild {
        fn group_item_type(&self) -> TypeId {
            self.item_type
        }

        fn group_item_type_name(&self) -> &'static str {
            self.item_name
        }

        async fn run(
            &self,
            _options: &ExporterOptions,
            _storage_targets: &[StorageTarget],
        ) -> Result<ExportResult, ExportError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(result) => Ok(result.clone()),
                Err(e) => Err(ExportError::DataSource(e.clone())),
            }
        }
    }

    struct TwoChildPlan;

    #[async_trait]
    impl GroupExportPlan for TwoChildPlan {
        fn child_exporter_types(&self) -> Vec<TypeId> {
            vec![TypeId::of::<Trades>(), TypeId::of::<Rates>()]
        }

        fn export_file_prefix(&self) -> &str {
            "Group"
        }

        async fn generate_export_metadata(
            &self,
            results: &[ExportResult],
            _options: &ExporterOptions,
            _storage_targets: &[StorageTarget],
        ) -> Result<(String, usize), ExportError> {
            let count = results.iter().map(|r| r.record_count).sum();
            Ok(("GroupMetadata.csv".to_string(), count))
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
    async fn missing_children_fail_fast_without_running_any_child() {
        let only_child = Arc::new(StubChild::succeeding::<Trades>("Trades", 10));
        let group =
            CsvStorageGroupExporter::new(Arc::new(TwoChildPlan), vec![only_child.clone()]);

        let result = group.execute(&sample_context(), &[]).await.unwrap();

        assert!(result.has_error);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing exporters from runtime. Expecting 2, Found 1")
        );
        assert_eq!(only_child.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn all_children_succeeding_reports_group_metadata() {
        let trades = Arc::new(StubChild::succeeding::<Trades>("Trades", 10));
        let rates = Arc::new(StubChild::succeeding::<Rates>("Rates", 5));
        let group = CsvStorageGroupExporter::new(
            Arc::new(TwoChildPlan),
            vec![trades.clone(), rates.clone()],
        );

        let result = group.execute(&sample_context(), &[]).await.unwrap();

        assert!(!result.has_error);
        assert_eq!(result.target_file.as_deref(), Some("GroupMetadata.csv"));
        assert_eq!(result.record_count, 15);
        assert_eq!(trades.runs.load(Ordering::SeqCst), 1);
        assert_eq!(rates.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn child_failures_are_joined_line_by_line() {
        let trades = Arc::new(StubChild::failing::<Trades>("Trades", "trades went missing"));
        let rates = Arc::new(StubChild::failing::<Rates>("Rates", "rates were stale"));
        let group = CsvStorageGroupExporter::new(Arc::new(TwoChildPlan), vec![trades, rates]);

        let result = group.execute(&sample_context(), &[]).await.unwrap();

        assert!(result.has_error);
        let error = result.error.unwrap();
        assert!(error.contains("trades went missing"));
        assert!(error.contains("rates were stale"));
        assert!(error.contains('\n'));
    }

    #[tokio::test]
    async fn extra_children_beyond_the_declared_set_are_ignored() {
        struct Fx;

        let trades = Arc::new(StubChild::succeeding::<Trades>("Trades", 10));
        let rates = Arc::new(StubChild::succeeding::<Rates>("Rates", 5));
        let stranger = Arc::new(StubChild::succeeding::<Fx>("Fx", 99));
        let group = CsvStorageGroupExporter::new(
            Arc::new(TwoChildPlan),
            vec![trades, rates, stranger.clone()],
        );

        let result = group.execute(&sample_context(), &[]).await.unwrap();

        assert!(!result.has_error);
        assert_eq!(result.record_count, 15);
        assert_eq!(stranger.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn child_transport_error_fails_the_group_with_run_context() {
        let trades = Arc::new(StubChild::succeeding::<Trades>("Trades", 10));
        let rates = Arc::new(StubChild::erroring::<Rates>("Rates", "connection reset"));
        let group = CsvStorageGroupExporter::new(Arc::new(TwoChildPlan), vec![trades, rates]);

        let context = sample_context();
        let result = group.execute(&context, &[]).await.unwrap();

        assert!(result.has_error);
        let error = result.error.unwrap();
        assert!(error.starts_with("Error in generating the exports. export context:"));
        assert!(error.contains(&context.export_id.to_string()));
    }
}
