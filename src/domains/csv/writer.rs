use futures::future::join_all;
use log::{error, info};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crate::domains::csv::config::CsvExportConfiguration;
use crate::domains::storage::{CsvStorageTargetResolver, StorageTarget};
use crate::errors::{ExportError, StorageTargetError, StorageTargetFailure};
use crate::utils::{to_json, type_label};

/// Number of retries after the first write attempt; the waits between
/// attempts are `delay`, `2 x delay`, `4 x delay` seconds.
const WRITE_RETRIES: u32 = 3;

/// Serializes an entity collection once, then delivers the buffer to every
/// configured storage target concurrently, retrying each target on its own
/// schedule and aggregating whatever still fails.
pub struct CsvFileWriter {
    storage_target_resolver: Arc<CsvStorageTargetResolver>,
}

impl CsvFileWriter {
    pub fn new(storage_target_resolver: Arc<CsvStorageTargetResolver>) -> Self {
        Self {
            storage_target_resolver,
        }
    }

    pub async fn write_file<T: Send + Sync + 'static>(
        &self,
        items: &[T],
        configuration: &CsvExportConfiguration<T>,
    ) -> Result<(), ExportError> {
        info!(
            "Writing {} {} to {}",
            items.len(),
            type_label::<T>(),
            to_json(&configuration.targets)
        );

        let content = generate_file(items, configuration)?;

        info!(
            "Writing contents for {} to the target storage list",
            type_label::<T>()
        );

        let writes = configuration
            .targets
            .iter()
            .map(|target| self.write_to_target(target, &configuration.file_name, &content));

        info!(
            "Wait for all storage exports for {} to complete",
            type_label::<T>()
        );

        let failures: Vec<StorageTargetFailure> = join_all(writes)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if failures.is_empty() {
            info!("All the exports for {} are completed", type_label::<T>());
            return Ok(());
        }

        let aggregate = StorageTargetError::new(failures);
        error!("Error in exporting to one or more storage. {}", aggregate);

        Err(aggregate.into())
    }

    async fn write_to_target(
        &self,
        target: &StorageTarget,
        file_name: &str,
        content: &[u8],
    ) -> Result<(), StorageTargetFailure> {
        // An unregistered target kind is structural, not transient: fail the
        // target without burning retries.
        let Some(backend) = self.storage_target_resolver.resolve(target.kind) else {
            let failure = StorageTargetFailure::NotFound(target.kind);
            error!("{}", failure);
            return Err(failure);
        };

        let mut attempt: u32 = 0;
        loop {
            match backend
                .write(&target.target_location, file_name, content)
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) if attempt < WRITE_RETRIES => {
                    let wait = target.retry_delay_secs << attempt;
                    error!(
                        "Error in writing file to target {}. Retry again in {}s. Reason: {}",
                        target.target_location, wait, e
                    );
                    sleep(Duration::from_secs(wait)).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(StorageTargetFailure::WriteFailed {
                        kind: target.kind,
                        location: target.target_location.clone(),
                        reason: e.to_string(),
                    })
                }
            }
        }
    }
}

/// Render every item into one in-memory CSV buffer. Serialization happens
/// exactly once regardless of how many targets the buffer goes to.
fn generate_file<T>(
    items: &[T],
    configuration: &CsvExportConfiguration<T>,
) -> Result<Vec<u8>, ExportError> {
    info!("Generating file content for {} output", type_label::<T>());

    let settings = &configuration.settings;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(settings.delimiter)
        .from_writer(Vec::new());

    if settings.has_header_record {
        writer
            .write_record(configuration.mapping.headers())
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
    }

    for item in items {
        writer
            .write_record(configuration.mapping.record(item, settings))
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Serialization(e.to_string()))
}
