//! JSON report printed by the CLI after an import.
//!
//! Wraps an [`ImportResult`] with a job id, an overall status and metadata
//! about the input so callers can audit which columns went where.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ImportKind, ImportResult};
use crate::transform::detector::FieldMapping;
use crate::transform::pipeline::ImportRun;

/// Overall status of an import report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Every row imported
    Ready,
    /// Some rows imported, some failed
    Warning,
    /// Nothing imported
    Error,
}

impl ReportStatus {
    pub fn of<R>(result: &ImportResult<R>) -> Self {
        if result.success {
            Self::Ready
        } else if result.imported > 0 {
            Self::Warning
        } else {
            Self::Error
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport<R> {
    /// Unique job identifier
    pub job_id: String,

    pub kind: ImportKind,

    pub status: ReportStatus,

    pub result: ImportResult<R>,

    pub metadata: ReportMetadata,
}

/// Metadata about the input and the detected mapping
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub row_count: usize,
    pub columns: Vec<String>,
    pub mappings: Vec<FieldMapping>,
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
}

impl<R> From<ImportRun<R>> for ImportReport<R> {
    fn from(run: ImportRun<R>) -> Self {
        ImportReport {
            job_id: Uuid::new_v4().to_string(),
            kind: run.kind,
            status: ReportStatus::of(&run.result),
            metadata: ReportMetadata {
                row_count: run.csv_info.row_count,
                columns: run.csv_info.headers,
                mappings: run.mappings.iter().cloned().collect(),
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            result: run.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImportError;
    use crate::parser::parse_csv;
    use crate::transform::mapper::{LeadMapper, PropertyMapper};
    use crate::transform::pipeline::{run_import, ImportOptions};

    #[test]
    fn test_status_of_result() {
        let mut result: ImportResult<()> = ImportResult::new();
        result.push_record(());
        assert_eq!(ReportStatus::of(&result.clone().finish()), ReportStatus::Ready);

        result.push_error(ImportError::for_data_row(1, "rejected"));
        assert_eq!(ReportStatus::of(&result.finish()), ReportStatus::Warning);

        let failed: ImportResult<()> = ImportResult::failure("No data found in CSV file");
        assert_eq!(ReportStatus::of(&failed), ReportStatus::Error);
    }

    #[test]
    fn test_report_from_run() {
        let parsed = parse_csv("Name,Mobile Number\nAhmed,01012345678\n");
        let run = run_import(&parsed, &LeadMapper, &ImportOptions::default());
        let report = ImportReport::from(run);

        assert_eq!(report.status, ReportStatus::Ready);
        assert_eq!(report.metadata.row_count, 1);
        assert_eq!(report.metadata.columns, vec!["Name", "Mobile Number"]);
        assert!(Uuid::parse_str(&report.job_id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&report.metadata.generated_at).is_ok());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], "leads");
        assert_eq!(value["status"], "ready");
        assert_eq!(value["result"]["data"][0]["phone"], "+201012345678");
        assert!(value["metadata"]["mappings"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m["canonicalField"] == "mobile" && m["csvColumn"] == "Mobile Number"));
    }

    #[test]
    fn test_report_for_empty_input() {
        let run = run_import(&parse_csv(""), &PropertyMapper, &ImportOptions::default());
        let value = serde_json::to_value(ImportReport::from(run)).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["result"]["errors"][0]["row"], 0);
        assert_eq!(value["metadata"]["mappings"], serde_json::json!([]));
    }
}
