use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default schedule exposed to external schedulers for newly registered
/// exports; this crate stores it for discovery, it never interprets it.
pub const DEFAULT_CRON_SCHEDULE: &str = "0 6 * * *";

/// Identifies one export run. Created by the caller per invocation and read
/// only throughout the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportExecutionContext {
    pub export_id: Uuid,
    pub export_execution_id: Uuid,
    pub as_of_date: DateTime<Utc>,
    pub success_web_hook: String,
    pub fail_web_hook: String,
}

impl ExportExecutionContext {
    pub fn new(
        export_id: Uuid,
        export_execution_id: Uuid,
        as_of_date: DateTime<Utc>,
        success_web_hook: impl Into<String>,
        fail_web_hook: impl Into<String>,
    ) -> Self {
        Self {
            export_id,
            export_execution_id,
            as_of_date,
            success_web_hook: success_web_hook.into(),
            fail_web_hook: fail_web_hook.into(),
        }
    }
}

/// Registry entry describing an exporter for discovery by external
/// schedulers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportMetadata {
    pub export_id: Uuid,
    pub export_name: String,
    pub export_description: String,
    pub default_export_schedule: String,
}

impl ExportMetadata {
    pub fn new(
        export_id: Uuid,
        export_name: impl Into<String>,
        export_description: impl Into<String>,
    ) -> Self {
        Self {
            export_id,
            export_name: export_name.into(),
            export_description: export_description.into(),
            default_export_schedule: DEFAULT_CRON_SCHEDULE.to_string(),
        }
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.default_export_schedule = schedule.into();
        self
    }
}

/// Acknowledgement returned by the exporter control API when a run is
/// accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportExecutionResult {
    pub export_id: Uuid,
    pub export_execution_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn metadata_defaults_cron_schedule() {
        let metadata = ExportMetadata::new(Uuid::new_v4(), "Trades", "Daily trades export");
        assert_eq!(metadata.default_export_schedule, "0 6 * * *");

        let custom = metadata.with_schedule("0 18 * * 5");
        assert_eq!(custom.default_export_schedule, "0 18 * * 5");
    }

    #[test]
    fn context_serializes_pascal_case() {
        let context = ExportExecutionContext::new(
            Uuid::nil(),
            Uuid::nil(),
            Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap(),
            "https://callbacks/success",
            "https://callbacks/fail",
        );

        let value = serde_json::to_value(&context).unwrap();
        assert!(value.get("ExportId").is_some());
        assert!(value.get("ExportExecutionId").is_some());
        assert!(value.get("AsOfDate").is_some());
        assert!(value.get("SuccessWebHook").is_some());
        assert!(value.get("FailWebHook").is_some());
    }
}
