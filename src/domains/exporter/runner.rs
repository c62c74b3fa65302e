use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

use crate::domains::csv::result::ExportResult;
use crate::domains::exporter::notifications::{
    ExportNotification, FailNotification, ReportNotifierBuilder, SuccessNotification,
};
use crate::domains::exporter::types::ExportExecutionContext;
use crate::domains::storage::StorageTarget;
use crate::errors::ExportError;
use crate::utils::to_json;

/// A runnable export as registered and discovered by callers. A run never
/// returns an error; every outcome ends in exactly one webhook notification.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn run(&self, context: &ExportExecutionContext, storage_targets: &[StorageTarget]);
}

/// The capability the lifecycle runner is parameterized with: produce one
/// [`ExportResult`] for a run. Data-level problems come back as failed
/// results; only transport-level breakage comes back as an error, and the
/// runner folds that into a failure notification too.
#[async_trait]
pub trait ExportOperation: Send + Sync {
    /// Label for log lines.
    fn name(&self) -> &str;

    async fn execute(
        &self,
        context: &ExportExecutionContext,
        storage_targets: &[StorageTarget],
    ) -> Result<ExportResult, ExportError>;
}

/// Shared run-report-notify lifecycle for every exporter shape: time the
/// operation, then route its outcome to the success or failure webhook.
pub struct ExportAgent {
    operation: Arc<dyn ExportOperation>,
    notifier_builder: Arc<dyn ReportNotifierBuilder>,
}

impl ExportAgent {
    pub fn new(
        operation: Arc<dyn ExportOperation>,
        notifier_builder: Arc<dyn ReportNotifierBuilder>,
    ) -> Self {
        Self {
            operation,
            notifier_builder,
        }
    }
}

#[async_trait]
impl Exporter for ExportAgent {
    async fn run(&self, context: &ExportExecutionContext, storage_targets: &[StorageTarget]) {
        let name = self.operation.name();
        info!(
            "Start of the export process for {}. Context: {}",
            name,
            to_json(context)
        );

        let started = Instant::now();
        let outcome = self.operation.execute(context, storage_targets).await;
        let elapsed_secs = started.elapsed().as_secs();

        let (url, notification) = match outcome {
            Ok(result) if result.has_error => {
                let error = result.error.clone().unwrap_or_default();
                error!(
                    "Error in the export process for {}. Error: {}. Context: {}",
                    name,
                    error,
                    to_json(context)
                );
                (
                    context.fail_web_hook.as_str(),
                    ExportNotification::Fail(FailNotification::from_context(context, error)),
                )
            }
            Ok(result) => {
                info!(
                    "Completion of the export process for {}. Result: {}",
                    name,
                    to_json(&result)
                );
                (
                    context.success_web_hook.as_str(),
                    ExportNotification::Success(SuccessNotification::from_context(
                        context,
                        result.record_count,
                        elapsed_secs,
                    )),
                )
            }
            Err(e) => {
                error!(
                    "Error in the export process for {}. Context: {}. Reason: {}",
                    name,
                    to_json(context),
                    e
                );
                (
                    context.fail_web_hook.as_str(),
                    ExportNotification::Fail(FailNotification::from_context(
                        context,
                        e.to_string(),
                    )),
                )
            }
        };

        if let Err(e) = self
            .notifier_builder
            .notification_for(url, notification)
            .run()
            .await
        {
            // Delivery is fire and forget; a run must end quietly.
            error!(
                "Error in delivering the export notification for {}. Reason: {}",
                name, e
            );
        }
    }
}
