use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::domains::exporter::types::ExportExecutionContext;
use crate::errors::ExportError;

/// Payload posted to the success webhook at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuccessNotification {
    pub export_id: Uuid,
    pub export_execution_id: Uuid,
    pub number_of_records: usize,
    /// Whole seconds.
    pub duration: u64,
}

impl SuccessNotification {
    pub fn from_context(
        context: &ExportExecutionContext,
        number_of_records: usize,
        duration: u64,
    ) -> Self {
        Self {
            export_id: context.export_id,
            export_execution_id: context.export_execution_id,
            number_of_records,
            duration,
        }
    }
}

/// Payload posted to the failure webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailNotification {
    pub export_id: Uuid,
    pub export_execution_id: Uuid,
    pub error: String,
}

impl FailNotification {
    pub fn from_context(context: &ExportExecutionContext, error: impl Into<String>) -> Self {
        Self {
            export_id: context.export_id,
            export_execution_id: context.export_execution_id,
            error: error.into(),
        }
    }
}

/// Either webhook payload; serialized as the inner shape on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportNotification {
    Success(SuccessNotification),
    Fail(FailNotification),
}

/// A notification that has been bound to its destination and is ready to be
/// delivered.
#[async_trait]
pub trait ReportNotifier: Send + Sync {
    async fn run(&self) -> Result<(), ExportError>;
}

/// Binds a payload to a destination URL. The runner asks for a fresh
/// notifier per run outcome.
pub trait ReportNotifierBuilder: Send + Sync {
    fn notification_for(
        &self,
        url: &str,
        notification: ExportNotification,
    ) -> Box<dyn ReportNotifier>;
}

/// Fire-and-forget JSON POST of the payload to the webhook URL. Delivery is
/// attempted once; failures are surfaced to the caller for logging only.
pub struct WebHookReportNotifier {
    client: Client,
    url: String,
    payload: ExportNotification,
}

#[async_trait]
impl ReportNotifier for WebHookReportNotifier {
    async fn run(&self) -> Result<(), ExportError> {
        debug!("Posting export notification to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&self.payload)
            .send()
            .await
            .map_err(|e| ExportError::Notification(format!("Failed to post notification: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ExportError::Notification(format!(
                "Notification endpoint returned {}",
                response.status()
            )))
        }
    }
}

/// Builds webhook notifiers sharing one HTTP client.
pub struct WebHookNotifierBuilder {
    client: Client,
}

impl WebHookNotifierBuilder {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for WebHookNotifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportNotifierBuilder for WebHookNotifierBuilder {
    fn notification_for(
        &self,
        url: &str,
        notification: ExportNotification,
    ) -> Box<dyn ReportNotifier> {
        Box::new(WebHookReportNotifier {
            client: self.client.clone(),
            url: url.to_string(),
            payload: notification,
        })
    }
}
