//! Field mapping detection.
//!
//! Scores every CSV header against the [`FIELD_PATTERNS`] dictionary and
//! keeps one header per canonical field. Built once from the header row and
//! reused for every data row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dictionary::{Field, FIELD_PATTERNS};
use crate::parser::RawRow;

/// Confidence when the normalized header equals the alias.
pub const EXACT_MATCH: f64 = 1.0;

/// Confidence when the normalized header only contains the alias.
pub const PARTIAL_MATCH: f64 = 0.8;

/// One header assigned to one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub csv_column: String,
    pub canonical_field: Field,
    pub confidence: f64,
}

/// Resolved header assignments for one import, keyed by canonical field.
///
/// A header may serve several fields; a field has at most one header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingTable {
    mappings: BTreeMap<Field, FieldMapping>,
}

impl MappingTable {
    pub fn get(&self, field: Field) -> Option<&FieldMapping> {
        self.mappings.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.mappings.contains_key(&field)
    }

    /// Header mapped to `field`.
    pub fn column(&self, field: Field) -> Option<&str> {
        self.get(field).map(|m| m.csv_column.as_str())
    }

    /// Trimmed cell of `row` under the header mapped to `field`.
    ///
    /// `None` when the field is unmapped or the cell is blank.
    pub fn cell<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r str> {
        self.column(field)
            .and_then(|column| row.get(column))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// First of `fields` that has a mapping.
    pub fn first_mapped(&self, fields: &[Field]) -> Option<Field> {
        fields.iter().copied().find(|f| self.contains(*f))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Keep `candidate` only if it beats the current mapping of its field.
    fn offer(&mut self, candidate: FieldMapping) {
        let replace = self
            .mappings
            .get(&candidate.canonical_field)
            .map_or(true, |existing| candidate.confidence > existing.confidence);
        if replace {
            self.mappings.insert(candidate.canonical_field, candidate);
        }
    }
}

/// Detect the mapping table for a header row.
///
/// For each header (lowercased and trimmed) and each field, the first alias
/// contained in the header yields a candidate with [`EXACT_MATCH`] or
/// [`PARTIAL_MATCH`] confidence. Per field the highest confidence wins and
/// ties go to the earlier header.
///
/// # Example
/// ```
/// use crm_import::{detect, Field};
///
/// let table = detect(&["Mobile Number", "email"]);
/// assert_eq!(table.get(Field::Mobile).unwrap().confidence, 0.8);
/// assert_eq!(table.get(Field::Email).unwrap().confidence, 1.0);
/// ```
pub fn detect<S: AsRef<str>>(headers: &[S]) -> MappingTable {
    let mut table = MappingTable::default();

    for header in headers {
        let column = header.as_ref().trim();
        let normalized = column.to_lowercase();

        for (field, aliases) in FIELD_PATTERNS {
            let Some(alias) = aliases.iter().find(|alias| normalized.contains(*alias)) else {
                continue;
            };

            let confidence = if normalized == *alias {
                EXACT_MATCH
            } else {
                PARTIAL_MATCH
            };

            table.offer(FieldMapping {
                csv_column: column.to_string(),
                canonical_field: *field,
                confidence,
            });
        }
    }

    table
}
