//! Error types for the CSV import engine.
//!
//! This module defines the error hierarchy used across the crate:
//!
//! - [`CsvError`] - reading and decoding CSV input
//! - [`MappingError`] - a single data row that cannot become a record
//! - [`ImportFailure`] - an import that cannot start at all
//! - [`CliError`] - top-level command-line errors
//!
//! Row-level and import-level failures never escape the orchestrator as
//! `Err`; they are folded into [`crate::models::ImportResult::errors`].
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors while reading CSV input from outside the process.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Content is not usable UTF-8 text.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A header line exists but no data line follows it.
    #[error("CSV file has no data rows")]
    NoDataRows,
}

// =============================================================================
// Row Mapping Errors
// =============================================================================

/// Errors a [`crate::transform::RecordMapper`] may raise for one row.
///
/// The built-in lead and property mappers never fail; stricter mappers
/// passed to [`crate::transform::pipeline::import_rows`] reject rows with
/// these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// Mapper-specific rejection.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Failures that stop an import before any row is mapped.
///
/// The orchestrator reports these as a single row-0 entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportFailure {
    /// Lead import found nothing to map.
    #[error("No data found in CSV file")]
    NoData,

    /// Property import found nothing to map.
    #[error("CSV file is empty or invalid")]
    EmptyOrInvalid,
}

// =============================================================================
// CLI Errors
// =============================================================================

/// Errors surfaced by the `crm-import` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Output could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The import ran but reported failure.
    #[error("Import finished with {failed} failed row(s)")]
    ImportFailed { failed: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV input operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for row mapping.
pub type MappingResult<T> = Result<T, MappingError>;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let cli_err: CliError = csv_err.into();
        assert!(cli_err.to_string().contains("empty"));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "leads.csv");
        let cli_err: CliError = CsvError::from(io_err).into();
        assert!(cli_err.to_string().contains("leads.csv"));
    }

    #[test]
    fn test_import_failure_messages() {
        assert_eq!(ImportFailure::NoData.to_string(), "No data found in CSV file");
        assert_eq!(
            ImportFailure::EmptyOrInvalid.to_string(),
            "CSV file is empty or invalid"
        );
    }

    #[test]
    fn test_invalid_value_format() {
        let err = MappingError::InvalidValue {
            field: "price".into(),
            message: "must be positive".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("price"));
        assert!(msg.contains("must be positive"));
    }
}
