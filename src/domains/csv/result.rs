use serde::Serialize;

/// Terminal outcome of one serialize-and-write operation (or one child
/// exporter's run). Built through the two factory paths and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub has_error: bool,
    pub error: Option<String>,
    pub target_file: Option<String>,
    pub record_count: usize,
}

impl ExportResult {
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            has_error: true,
            error: Some(error.into()),
            target_file: None,
            record_count: 0,
        }
    }

    pub fn fail_with_file(error: impl Into<String>, target_file: impl Into<String>) -> Self {
        Self {
            has_error: true,
            error: Some(error.into()),
            target_file: Some(target_file.into()),
            record_count: 0,
        }
    }

    /// Record a successful export. `record_count` of zero is a caller bug:
    /// empty exports must be reported through [`ExportResult::fail`].
    pub fn success(target_file: impl Into<String>, record_count: usize) -> Self {
        assert!(record_count > 0, "a successful export must have records");

        Self {
            has_error: false,
            error: None,
            target_file: Some(target_file.into()),
            record_count,
        }
    }
}
