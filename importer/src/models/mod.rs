//! Domain models for the import engine.
//!
//! This module contains the records produced by an import and the result
//! envelope handed back to the caller:
//!
//! - [`Lead`] - a CRM lead mapped from one CSV row
//! - [`Property`] - a property listing mapped from one CSV row
//! - [`ImportError`] - a failed row (or a failed import, at row 0)
//! - [`ImportResult`] - counts, errors and mapped records of one import
//! - [`ImportKind`] - which record shape an import produces
//! - [`BulkPayload`] - request body for the bulk-insert endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Import Kind
// =============================================================================

/// The two record shapes an import can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Leads,
    Properties,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Properties => "properties",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lead
// =============================================================================

/// A lead ready for the `/leads/bulk` endpoint.
///
/// `name` is always present ("No Name" when the row has none). The
/// categorical fields always resolve to a value through the classifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub source: String,
    pub status: String,
    #[serde(rename = "type")]
    pub lead_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: String,
}

// =============================================================================
// Property
// =============================================================================

/// A property listing ready for the `/properties/bulk` endpoint.
///
/// Numeric fields other than `price` are omitted when the source cell holds
/// no usable number, which is not the same as zero for the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    pub property_type: String,
    /// Listing type: "For Sale" or "For Rent" (or the raw mapped value).
    pub category: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    pub is_public: bool,
}

// =============================================================================
// Import Result
// =============================================================================

/// A row that could not be imported.
///
/// `row` is the 1-based line number counting the header, so data row `i`
/// (0-based) is reported as `i + 2`. Row 0 means the whole import failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportError {
    pub row: usize,
    pub error: String,
}

impl ImportError {
    pub fn new(row: usize, error: impl Into<String>) -> Self {
        Self {
            row,
            error: error.into(),
        }
    }

    /// Error for the 0-based data row `index`.
    pub fn for_data_row(index: usize, error: impl Into<String>) -> Self {
        Self::new(index + 2, error)
    }
}

/// Outcome of one import.
///
/// `imported + failed` equals the number of data rows processed and
/// `success` is `failed == 0`, except for the row-0 failure produced when
/// there is nothing to process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult<R> {
    pub success: bool,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
    pub data: Vec<R>,
}

impl<R> ImportResult<R> {
    pub fn new() -> Self {
        Self {
            success: true,
            imported: 0,
            failed: 0,
            errors: Vec::new(),
            data: Vec::new(),
        }
    }

    /// An import that could not start.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            imported: 0,
            failed: 0,
            errors: vec![ImportError::new(0, reason)],
            data: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: R) {
        self.data.push(record);
        self.imported += 1;
    }

    pub fn push_error(&mut self, error: ImportError) {
        self.errors.push(error);
        self.failed += 1;
    }

    /// Recompute `success` from the counters.
    pub fn finish(mut self) -> Self {
        self.success = self.failed == 0;
        self
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Imported: {} records, {} failed",
            self.imported, self.failed
        )
    }
}

impl<R> Default for ImportResult<R> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Bulk Payloads
// =============================================================================

/// Request body accepted by the bulk-insert endpoints.
///
/// Serialises as `{"leads": [...]}` or `{"properties": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkPayload {
    Leads { leads: Vec<Lead> },
    Properties { properties: Vec<Property> },
}

impl From<Vec<Lead>> for BulkPayload {
    fn from(leads: Vec<Lead>) -> Self {
        Self::Leads { leads }
    }
}

impl From<Vec<Property>> for BulkPayload {
    fn from(properties: Vec<Property>) -> Self {
        Self::Properties { properties }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_lead() -> Lead {
        Lead {
            name: "Sara Mohamed".into(),
            phone: Some("+201112345678".into()),
            email: None,
            source: "Facebook".into(),
            status: "contacted".into(),
            lead_type: "renter".into(),
            notes: None,
            priority: "medium".into(),
        }
    }

    #[test]
    fn test_lead_serialization_skips_absent_fields() {
        let value = serde_json::to_value(sample_lead()).unwrap();
        assert_eq!(value["type"], "renter");
        assert!(value.get("email").is_none());
        assert!(value.get("notes").is_none());
        assert_eq!(value["phone"], "+201112345678");
    }

    #[test]
    fn test_property_camel_case() {
        let property = Property {
            title: "Apartment in Zamalek".into(),
            description: None,
            price: 15000.0,
            location: None,
            city: None,
            region: None,
            area: None,
            bedrooms: Some(3),
            bathrooms: None,
            property_type: "Apartment".into(),
            category: "For Rent".into(),
            status: "available".into(),
            image_url: Some("https://example.com/apartment.jpg".into()),
            latitude: None,
            longitude: None,
            amenities: None,
            is_public: true,
        };
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["propertyType"], "Apartment");
        assert_eq!(value["isPublic"], true);
        assert_eq!(value["imageUrl"], "https://example.com/apartment.jpg");
        assert!(value.get("area").is_none());
    }

    #[test]
    fn test_result_counters() {
        let mut result: ImportResult<Lead> = ImportResult::new();
        result.push_record(sample_lead());
        result.push_error(ImportError::for_data_row(1, "rejected"));
        let result = result.finish();

        assert!(!result.success);
        assert_eq!(result.imported, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].row, 3);
    }

    #[test]
    fn test_failure_is_row_zero() {
        let result: ImportResult<Property> = ImportResult::failure("CSV file is empty or invalid");
        assert!(!result.success);
        assert_eq!(result.errors, vec![ImportError::new(0, "CSV file is empty or invalid")]);
        assert_eq!(result.failed, 0);
    }

    #[test]
    fn test_bulk_payload_shape() {
        let payload = BulkPayload::from(vec![sample_lead()]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["leads"][0]["name"], "Sara Mohamed");

        let empty: BulkPayload = Vec::<Property>::new().into();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({ "properties": [] }));
    }
}
