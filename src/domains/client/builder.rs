use reqwest::Url;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domains::client::rest_client::{ExporterClient, RestExporterClient};
use crate::errors::{ClientError, ClientResult};

/// Collects named exporter endpoints at configuration time and hands out
/// ready-to-use clients by name. Names are unique; URLs must be absolute.
#[derive(Default)]
pub struct ExporterClientBuilder {
    clients: HashMap<String, String>,
}

impl ExporterClientBuilder {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    pub fn add_client(
        mut self,
        name: impl Into<String>,
        client_url: impl Into<String>,
    ) -> ClientResult<Self> {
        let name = name.into();
        let client_url = client_url.into();

        if self.clients.contains_key(&name) {
            return Err(ClientError::DuplicateExporter(name));
        }

        if Url::parse(&client_url).is_err() {
            return Err(ClientError::InvalidUrlFormat(client_url));
        }

        self.clients.insert(name, client_url);
        Ok(self)
    }

    pub fn build(&self, name: &str) -> ClientResult<Arc<dyn ExporterClient>> {
        let url = self
            .clients
            .get(name)
            .ok_or_else(|| ClientError::ExporterNotFound(name.to_string()))?;

        Ok(Arc::new(RestExporterClient::new(url.clone())))
    }
}
