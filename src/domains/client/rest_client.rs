use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::domains::exporter::types::{
    ExportExecutionContext, ExportExecutionResult, ExportMetadata,
};
use crate::errors::{ClientError, ClientResult};

/// Client-side surface of a remote exporter control API: trigger a run and
/// discover what the remote agent can export.
#[async_trait]
pub trait ExporterClient: Send + Sync {
    async fn execute_export(
        &self,
        execution_context: &ExportExecutionContext,
    ) -> ClientResult<ExportExecutionResult>;

    async fn discover_exports(&self) -> ClientResult<Vec<ExportMetadata>>;
}

/// HTTP implementation of [`ExporterClient`] against a configured base URL.
pub struct RestExporterClient {
    client: Client,
    base_url: String,
}

impl RestExporterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn read_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to get error details".to_string());

        ClientError::Api(format!("Server returned error {}: {}", status, detail))
    }
}

#[async_trait]
impl ExporterClient for RestExporterClient {
    async fn execute_export(
        &self,
        execution_context: &ExportExecutionContext,
    ) -> ClientResult<ExportExecutionResult> {
        let url = format!("{}/api/v1/exporters/new", self.base_url);
        debug!("Requesting export execution at {}", url);

        let response = self
            .client
            .post(&url)
            .json(execution_context)
            .send()
            .await
            .map_err(|e| ClientError::Api(format!("Failed to execute export: {}", e)))?;

        if response.status().is_success() {
            response
                .json::<ExportExecutionResult>()
                .await
                .map_err(|e| ClientError::Api(format!("Failed to parse execution result: {}", e)))
        } else {
            Err(Self::read_error(response).await)
        }
    }

    async fn discover_exports(&self) -> ClientResult<Vec<ExportMetadata>> {
        let url = format!("{}/api/v1/exporters/discover", self.base_url);
        debug!("Discovering exports at {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Api(format!("Failed to discover exports: {}", e)))?;

        if response.status().is_success() {
            response
                .json::<Vec<ExportMetadata>>()
                .await
                .map_err(|e| ClientError::Api(format!("Failed to parse export metadata: {}", e)))
        } else {
            Err(Self::read_error(response).await)
        }
    }
}
