//! High-level import API.
//!
//! This module combines all steps: tokenizing, mapping detection, per-row
//! mapping and result collection. Nothing here returns `Err` for bad data;
//! an empty input becomes a row-0 error and each failed row becomes one
//! entry in [`ImportResult::errors`].
//!
//! # Example
//!
//! ```rust
//! use crm_import::import_leads;
//!
//! let result = import_leads("Name,Phone\nAhmed,01012345678\n");
//! assert!(result.success);
//! assert_eq!(result.data[0].phone.as_deref(), Some("+201012345678"));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::detector::{detect, MappingTable};
use super::mapper::{LeadMapper, PropertyMapper, RecordMapper};
use crate::error::{CsvResult, ImportFailure};
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning, log_warning_indent};
use crate::models::{BulkPayload, ImportError, ImportKind, ImportResult, Lead, Property};
use crate::parser::{parse_csv, read_csv_file, ParsedCsv};

/// Options for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Log every detected header mapping
    pub log_mapping: bool,

    /// Log the first mapped record
    pub preview_first: bool,

    /// Failed rows logged individually before the rest are summarised
    pub max_logged_errors: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            log_mapping: true,
            preview_first: true,
            max_logged_errors: 10,
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of one import with the context it ran in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRun<R> {
    pub kind: ImportKind,
    pub csv_info: CsvInfo,
    pub mappings: MappingTable,
    pub result: ImportResult<R>,
}

/// An import run of either kind, as produced by [`import_file`].
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Leads(ImportRun<Lead>),
    Properties(ImportRun<Property>),
}

impl ImportOutcome {
    pub fn kind(&self) -> ImportKind {
        match self {
            Self::Leads(_) => ImportKind::Leads,
            Self::Properties(_) => ImportKind::Properties,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            Self::Leads(run) => run.result.success,
            Self::Properties(run) => run.result.success,
        }
    }

    pub fn failed(&self) -> usize {
        match self {
            Self::Leads(run) => run.result.failed,
            Self::Properties(run) => run.result.failed,
        }
    }

    /// Mapped records as a bulk-insert request body.
    pub fn into_payload(self) -> BulkPayload {
        match self {
            Self::Leads(run) => run.result.data.into(),
            Self::Properties(run) => run.result.data.into(),
        }
    }
}

// =============================================================================
// Entry Points
// =============================================================================

pub fn import_leads(csv: &str) -> ImportResult<Lead> {
    import_leads_with(csv, &ImportOptions::default())
}

pub fn import_leads_with(csv: &str, options: &ImportOptions) -> ImportResult<Lead> {
    import_rows(&parse_csv(csv), &LeadMapper, options)
}

pub fn import_properties(csv: &str) -> ImportResult<Property> {
    import_properties_with(csv, &ImportOptions::default())
}

pub fn import_properties_with(csv: &str, options: &ImportOptions) -> ImportResult<Property> {
    import_rows(&parse_csv(csv), &PropertyMapper, options)
}

/// Import a CSV file of the given kind.
///
/// Fails only when the file cannot be read or is not UTF-8; data problems
/// are reported inside the run's [`ImportResult`].
pub fn import_file<P: AsRef<Path>>(
    path: P,
    kind: ImportKind,
    options: &ImportOptions,
) -> CsvResult<ImportOutcome> {
    log_info(format!("📖 Reading {}...", path.as_ref().display()));
    let content = read_csv_file(path)?;
    let parsed = parse_csv(&content);

    Ok(match kind {
        ImportKind::Leads => ImportOutcome::Leads(run_import(&parsed, &LeadMapper, options)),
        ImportKind::Properties => {
            ImportOutcome::Properties(run_import(&parsed, &PropertyMapper, options))
        }
    })
}

/// Run `mapper` over every data row of `parsed`.
pub fn import_rows<M: RecordMapper>(
    parsed: &ParsedCsv,
    mapper: &M,
    options: &ImportOptions,
) -> ImportResult<M::Record> {
    run_import(parsed, mapper, options).result
}

/// Like [`import_rows`], also returning the headers and mapping table used.
pub fn run_import<M: RecordMapper>(
    parsed: &ParsedCsv,
    mapper: &M,
    options: &ImportOptions,
) -> ImportRun<M::Record> {
    let kind = mapper.kind();
    let csv_info = CsvInfo {
        headers: parsed.headers.clone(),
        row_count: parsed.row_count(),
    };

    log_info(format!("📋 Importing {}", kind));
    log_success(format!("Read {} rows", csv_info.row_count));

    if parsed.is_empty() {
        let failure = empty_input_failure(kind);
        log_error(failure.to_string());
        return ImportRun {
            kind,
            csv_info,
            mappings: MappingTable::default(),
            result: ImportResult::failure(failure.to_string()),
        };
    }

    log_info(format!("CSV has {} columns: {}", parsed.headers.len(), parsed.headers.join(", ")));

    let mappings = detect(&parsed.headers);
    if options.log_mapping {
        print_mappings(&mappings);
    }

    let result = map_rows(parsed, mapper, &mappings, options);

    if result.success {
        log_success(result.summary());
    } else {
        log_warning(result.summary());
    }

    ImportRun {
        kind,
        csv_info,
        mappings,
        result,
    }
}

// =============================================================================
// Internals
// =============================================================================

fn empty_input_failure(kind: ImportKind) -> ImportFailure {
    match kind {
        ImportKind::Leads => ImportFailure::NoData,
        ImportKind::Properties => ImportFailure::EmptyOrInvalid,
    }
}

fn map_rows<M: RecordMapper>(
    parsed: &ParsedCsv,
    mapper: &M,
    mappings: &MappingTable,
    options: &ImportOptions,
) -> ImportResult<M::Record> {
    let mut result = ImportResult::new();

    for (index, row) in parsed.rows.iter().enumerate() {
        match mapper.map_row(row, mappings) {
            Ok(record) => {
                if options.preview_first && result.imported == 0 {
                    if let Ok(json) = serde_json::to_string(&record) {
                        log_info_indent(format!("First record: {}", json), 1);
                    }
                }
                result.push_record(record);
            }
            Err(e) => {
                let error = ImportError::for_data_row(index, e.to_string());
                if result.failed < options.max_logged_errors {
                    log_warning_indent(format!("Row {}: {}", error.row, error.error), 1);
                }
                result.push_error(error);
            }
        }
    }

    if result.failed > options.max_logged_errors {
        log_warning_indent(
            format!("... +{} more failed rows", result.failed - options.max_logged_errors),
            1,
        );
    }

    result.finish()
}

/// Print detected mappings
fn print_mappings(mappings: &MappingTable) {
    if mappings.is_empty() {
        log_warning("No columns matched a known field");
        return;
    }
    log_info("🗺️  Detected mapping:");
    for mapping in mappings.iter() {
        log_info_indent(
            format!(
                "{} → {} ({:.1})",
                mapping.csv_column, mapping.canonical_field, mapping.confidence
            ),
            1,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MappingError, MappingResult};
    use crate::parser::RawRow;
    use std::io::Write;

    const LEAD_TEMPLATE: &str = concat!(
        "Full Name,Mobile Number,Email,Source,Status,Type,Notes,Budget,Property Type,Priority\n",
        "\"Ahmed Hassan\",\"01001234567\",\"ahmed@example.com\",\"Website\",\"new\",\"buyer\",",
        "\"Looking for 3BR apartment\",\"2,000,000 EGP\",\"Apartment\",\"high\"\n",
        "\"Sara Mohamed\",\"01112345678\",\"sara@example.com\",\"Facebook\",\"contacted\",\"renter\",",
        "\"Wants furnished apartment\",\"15,000 EGP/month\",\"Apartment\",\"medium\"\n",
    );

    /// Rejects rows whose name is "broken".
    struct RejectBroken;

    impl RecordMapper for RejectBroken {
        type Record = Lead;

        fn kind(&self) -> ImportKind {
            ImportKind::Leads
        }

        fn map_row(&self, row: &RawRow, table: &MappingTable) -> MappingResult<Lead> {
            if row.get("Name") == Some("broken") {
                return Err(MappingError::InvalidValue {
                    field: "name".into(),
                    message: "rejected".into(),
                });
            }
            LeadMapper.map_row(row, table)
        }
    }

    #[test]
    fn test_import_leads_end_to_end() {
        let result = import_leads(LEAD_TEMPLATE);

        assert!(result.success);
        assert_eq!(result.imported, 2);
        assert_eq!(result.failed, 0);
        assert!(result.errors.is_empty());

        let lead = &result.data[0];
        assert_eq!(lead.name, "Ahmed Hassan");
        assert_eq!(lead.phone.as_deref(), Some("+201001234567"));
        assert_eq!(lead.source, "Website");
        assert_eq!(lead.status, "new");
        assert_eq!(lead.lead_type, "buyer");
        let notes = lead.notes.as_deref().unwrap();
        assert!(notes.contains("Looking for 3BR apartment"));
        assert!(notes.contains("Budget: 2,000,000 EGP"));

        let lead = &result.data[1];
        assert_eq!(lead.source, "Facebook");
        assert_eq!(lead.lead_type, "renter");
        assert_eq!(lead.priority, "medium");
    }

    #[test]
    fn test_failed_row_numbering() {
        let parsed = parse_csv("Name,Phone\nA,1\nB,2\nbroken,3\nD,4\n");
        let result = import_rows(&parsed, &RejectBroken, &ImportOptions::default());

        assert!(!result.success);
        assert_eq!(result.imported, 3);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].row, 4);
        assert!(result.errors[0].error.contains("rejected"));
        assert_eq!(result.data[2].name, "D");
    }

    #[test]
    fn test_blank_rows_import_with_fallbacks() {
        let result = import_leads("Name,Phone,Email\nAhmed,01012345678,a@b.com\n,,\n");
        assert!(result.success);
        assert_eq!(result.imported, 2);
        assert_eq!(result.failed, 0);
        assert_eq!(result.data[1].name, "No Name");

        let result = import_properties("Title,Price\nVilla,100\n,\n");
        assert!(result.success);
        assert_eq!(result.imported, 2);
        assert_eq!(result.data[1].title, "Untitled Property");
    }

    #[test]
    fn test_no_data_rows() {
        let result = import_leads("Name,Phone\n");
        assert!(!result.success);
        assert_eq!(result.imported, 0);
        assert_eq!(result.failed, 0);
        assert_eq!(result.errors, vec![ImportError::new(0, "No data found in CSV file")]);
        assert!(result.data.is_empty());

        let result = import_properties("");
        assert_eq!(result.errors, vec![ImportError::new(0, "CSV file is empty or invalid")]);
    }

    #[test]
    fn test_import_properties() {
        let csv = concat!(
            "Property Name,Price,Area,Bedrooms,Status\n",
            "Palm Hills Villa,\"12,000,000\",450 sqm,5,available\n",
            "Zamalek Flat,25000,0,2,rented\n",
        );
        let result = import_properties(csv);

        assert!(result.success);
        assert_eq!(result.imported, 2);

        let first = &result.data[0];
        assert_eq!(first.title, "Palm Hills Villa");
        assert_eq!(first.price, 12_000_000.0);
        assert_eq!(first.area, Some(450.0));
        assert_eq!(first.property_type, "Villa");
        assert_eq!(first.category, "For Sale");
        assert!(first.is_public);

        let second = &result.data[1];
        assert_eq!(second.area, None);
        assert_eq!(second.category, "For Rent");
        assert_eq!(second.status, "rented");
        assert!(!second.is_public);
    }

    #[test]
    fn test_run_import_exposes_mappings() {
        let parsed = parse_csv(LEAD_TEMPLATE);
        let run = run_import(&parsed, &LeadMapper, &ImportOptions::default());

        assert_eq!(run.kind, ImportKind::Leads);
        assert_eq!(run.csv_info.row_count, 2);
        assert_eq!(run.csv_info.headers.len(), 10);
        assert_eq!(run.mappings.column(crate::Field::Mobile), Some("Mobile Number"));
    }

    #[test]
    fn test_import_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{feff}Name,Phone\r\nAhmed,01012345678\r\n".as_bytes())
            .unwrap();

        let outcome = import_file(file.path(), ImportKind::Leads, &ImportOptions::default()).unwrap();
        assert_eq!(outcome.kind(), ImportKind::Leads);
        assert!(outcome.success());
        assert_eq!(outcome.failed(), 0);

        let payload = serde_json::to_value(outcome.into_payload()).unwrap();
        assert_eq!(payload["leads"][0]["name"], "Ahmed");
        assert_eq!(payload["leads"][0]["phone"], "+201012345678");
    }

    #[test]
    fn test_import_file_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'N', b'a', 0xff, b'\n']).unwrap();

        let outcome = import_file(file.path(), ImportKind::Properties, &ImportOptions::default());
        assert!(matches!(outcome, Err(crate::CsvError::EncodingError(_))));
    }
}
