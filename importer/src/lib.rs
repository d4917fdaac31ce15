//! # crm-import - CSV field mapping for real-estate CRM imports
//!
//! Takes arbitrary, human-produced CSV exports of leads or property listings
//! (unknown column order, English or Arabic headers) and maps them onto the
//! CRM's canonical records without any manual column mapping.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV text   │────▶│  Tokenizer  │────▶│  Detector   │────▶│   Mappers   │
//! │   (UTF-8)   │     │ (RawRow[])  │     │ (aliases)   │     │ (normalize, │
//! └─────────────┘     └─────────────┘     └─────────────┘     │  classify)  │
//!                                                             └──────┬──────┘
//!                                                                    ▼
//!                                                             ImportResult
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use crm_import::import_properties;
//!
//! let csv = "Title,Price,Bedrooms\nSea view chalet for rent,25000,2\n";
//! let result = import_properties(csv);
//!
//! assert!(result.success);
//! assert_eq!(result.data[0].property_type, "Chalet");
//! assert_eq!(result.data[0].category, "For Rent");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Records and the import result envelope
//! - [`parser`] - CSV tokenizer and file input
//! - [`transform`] - Dictionary, detection, normalizers, classifiers, mappers, pipeline
//! - [`report`] - JSON report envelope
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod logs;
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CliError, CliResult, CsvError, CsvResult, ImportFailure, MappingError, MappingResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{BulkPayload, ImportError, ImportKind, ImportResult, Lead, Property};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    csv_to_json, decode_content, parse_csv, parse_csv_file, parse_line, read_csv_file,
    ParsedCsv, RawRow,
};

// =============================================================================
// Re-exports - Mapping
// =============================================================================

pub use transform::{
    classify_listing_type, clean_phone, coerce_count, coerce_number, coerce_price, combine_name,
    detect, fields_description, Classifier, Field, FieldMapping, KeywordGroup, LeadMapper,
    MappingTable, NumberKind, PropertyMapper, RecordMapper, FIELD_PATTERNS,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    import_file, import_leads, import_leads_with, import_properties, import_properties_with,
    import_rows, run_import, CsvInfo, ImportOptions, ImportOutcome, ImportRun,
};

// =============================================================================
// Re-exports - Report & Logs
// =============================================================================

pub use logs::{configure as configure_logging, LogConfig, LogEntry, LogFormat, LogLevel};
pub use report::{ImportReport, ReportMetadata, ReportStatus};
