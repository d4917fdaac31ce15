//! Record mappers.
//!
//! Turn one [`RawRow`] into one canonical record using the detected
//! [`MappingTable`], the normalizers and the classifiers. The built-in
//! mappers never fail: missing data falls back to defaults, so even a row of
//! bare commas becomes a "No Name" lead or an "Untitled Property".

use serde::Serialize;

use super::classify::{classify_listing_type, LEAD_STATUS, LEAD_TYPE, PROPERTY_TYPE, SOURCE};
use super::detector::MappingTable;
use super::dictionary::Field;
use super::normalize::{clean_phone, coerce_count, coerce_number, coerce_price, combine_name, NumberKind};
use crate::error::MappingResult;
use crate::models::{ImportKind, Lead, Property};
use crate::parser::RawRow;

/// Priority given to leads without a priority cell.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Title given to properties without any title-like cell.
pub const UNTITLED_PROPERTY: &str = "Untitled Property";

/// Status given to properties without a status cell.
pub const DEFAULT_PROPERTY_STATUS: &str = "available";

/// Header fragments that usually hold a property's title.
const TITLE_LIKE_HEADERS: &[&str] = &[
    "property name",
    "properties name",
    "compound",
    "compound name",
    "properties compound",
    "property compound",
    "project",
    "name",
    "title",
];

/// Extra lead columns folded into the notes, in output order.
const NOTE_FIELDS: &[(Field, &str)] = &[
    (Field::Address, "Address"),
    (Field::Company, "Company"),
    (Field::Budget, "Budget"),
    (Field::PropertyType, "Property Type"),
];

/// Maps raw rows of one import kind to records.
pub trait RecordMapper {
    type Record: Serialize;

    fn kind(&self) -> ImportKind;

    /// Map one row. An `Err` is recorded against the row and the import
    /// continues with the next one.
    fn map_row(&self, row: &RawRow, table: &MappingTable) -> MappingResult<Self::Record>;
}

// =============================================================================
// Leads
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadMapper;

impl RecordMapper for LeadMapper {
    type Record = Lead;

    fn kind(&self) -> ImportKind {
        ImportKind::Leads
    }

    fn map_row(&self, row: &RawRow, table: &MappingTable) -> MappingResult<Lead> {
        let row_text = row.text();

        Ok(Lead {
            name: lead_name(row, table),
            phone: table
                .cell(row, Field::Mobile)
                .map(clean_phone)
                .filter(|p| !p.is_empty()),
            email: table.cell(row, Field::Email).map(str::to_string),
            source: SOURCE.resolve(table.cell(row, Field::Source), &row_text).to_string(),
            status: LEAD_STATUS.resolve(table.cell(row, Field::Status), &row_text).to_string(),
            lead_type: LEAD_TYPE.resolve(table.cell(row, Field::Type), &row_text).to_string(),
            notes: lead_notes(row, table),
            priority: table
                .cell(row, Field::Priority)
                .unwrap_or(DEFAULT_PRIORITY)
                .to_string(),
        })
    }
}

/// Name from full name or first + last.
///
/// The full-name aliases include plain "name", so a "First Name" column is
/// also detected as a full name; such a column is only used as first name.
fn lead_name(row: &RawRow, table: &MappingTable) -> String {
    let full_column = table.column(Field::FullName);
    let shadows_part = full_column.is_some()
        && (full_column == table.column(Field::FirstName)
            || full_column == table.column(Field::LastName));

    let full = if shadows_part {
        None
    } else {
        table.cell(row, Field::FullName)
    };

    combine_name(
        table.cell(row, Field::FirstName),
        table.cell(row, Field::LastName),
        full,
    )
}

fn lead_notes(row: &RawRow, table: &MappingTable) -> Option<String> {
    let mut lines: Vec<String> = table
        .cell(row, Field::Notes)
        .map(|n| vec![n.to_string()])
        .unwrap_or_default();

    for (field, label) in NOTE_FIELDS {
        if let Some(value) = table.cell(row, *field) {
            lines.push(format!("{}: {}", label, value));
        }
    }

    let notes = lines.join("\n").trim().to_string();
    (!notes.is_empty()).then_some(notes)
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyMapper;

impl RecordMapper for PropertyMapper {
    type Record = Property;

    fn kind(&self) -> ImportKind {
        ImportKind::Properties
    }

    fn map_row(&self, row: &RawRow, table: &MappingTable) -> MappingResult<Property> {
        let row_text = row.text();
        let cell = |field: Field| table.cell(row, field).map(str::to_string);

        let city = cell(Field::City);
        let region = cell(Field::Region);

        let location = table
            .first_mapped(&[Field::Location, Field::Address])
            .and_then(|field| cell(field))
            .or_else(|| join_location(region.as_deref(), city.as_deref()));

        let (latitude, longitude) =
            if table.contains(Field::Latitude) && table.contains(Field::Longitude) {
                (
                    table
                        .cell(row, Field::Latitude)
                        .and_then(|v| coerce_number(v, NumberKind::Coordinate)),
                    table
                        .cell(row, Field::Longitude)
                        .and_then(|v| coerce_number(v, NumberKind::Coordinate)),
                )
            } else {
                (None, None)
            };

        let status = table
            .first_mapped(&[Field::PropertyStatus, Field::Status])
            .and_then(|field| cell(field))
            .unwrap_or_else(|| DEFAULT_PROPERTY_STATUS.to_string());

        Ok(Property {
            title: property_title(row, table),
            description: cell(Field::Description),
            price: table.cell(row, Field::Price).map(coerce_price).unwrap_or(0.0),
            location,
            city,
            region,
            area: table
                .cell(row, Field::Area)
                .and_then(|v| coerce_number(v, NumberKind::Area)),
            bedrooms: table.cell(row, Field::Bedrooms).and_then(coerce_count),
            bathrooms: table.cell(row, Field::Bathrooms).and_then(coerce_count),
            property_type: cell(Field::PropertyType)
                .unwrap_or_else(|| PROPERTY_TYPE.classify(&row_text).to_string()),
            category: cell(Field::ListingType)
                .unwrap_or_else(|| classify_listing_type(&row_text).to_string()),
            is_public: status == DEFAULT_PROPERTY_STATUS,
            status,
            image_url: cell(Field::ImageUrl),
            latitude,
            longitude,
            amenities: cell(Field::Amenities),
        })
    }
}

/// Title from the mapped column, then any title-like header, then a placeholder.
fn property_title(row: &RawRow, table: &MappingTable) -> String {
    if let Some(title) = table.cell(row, Field::Title) {
        return title.to_string();
    }

    row.iter()
        .find(|(header, value)| {
            let header = header.trim().to_lowercase();
            !value.trim().is_empty() && TITLE_LIKE_HEADERS.iter().any(|t| header.contains(t))
        })
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_else(|| UNTITLED_PROPERTY.to_string())
}

/// "region, city" with blank parts dropped.
fn join_location(region: Option<&str>, city: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [region, city].into_iter().flatten().collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
