//! CSV tokenizer for user-exported spreadsheets.
//!
//! Splits decoded text into a header line and one [`RawRow`] per data line.
//! No field-mapping logic here. The tokenizer never fails: malformed quoting
//! is absorbed into the current cell and short rows are padded with empty
//! strings.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Raw Row
// =============================================================================

/// One data line keyed by header, in column order.
///
/// Inserting an existing header overwrites its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((header, value)),
        }
    }

    /// Cell value for an exact (trimmed) header.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Cell value for a header, `None` when missing or blank.
    pub fn non_empty(&self, header: &str) -> Option<&str> {
        self.get(header).filter(|v| !v.trim().is_empty())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cell values joined with a space and lowercased.
    ///
    /// This is the haystack the keyword classifiers scan.
    pub fn text(&self) -> String {
        self.values().collect::<Vec<_>>().join(" ").to_lowercase()
    }

    pub fn to_json(&self) -> Value {
        let obj: Map<String, Value> = self
            .iter()
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        Value::Object(obj)
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (header, value) in &self.cells {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

impl<H: Into<String>, V: Into<String>> FromIterator<(H, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (h, v) in iter {
            row.insert(h, v);
        }
        row
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Tokenized CSV content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    /// Distinct trimmed headers in column order (the keys of every row)
    pub headers: Vec<String>,
    /// Data rows, blank lines excluded
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse CSV text into headers and rows.
///
/// The first non-blank line is the header. Every following non-blank line
/// becomes a row with exactly one cell per header: missing trailing cells
/// are empty strings and extra cells are dropped.
///
/// # Example
/// ```
/// use crm_import::parse_csv;
///
/// let parsed = parse_csv("Name,Phone\n\"Hassan, Ahmed\",0100\n\n");
/// assert_eq!(parsed.headers, vec!["Name", "Phone"]);
/// assert_eq!(parsed.rows[0].get("Name"), Some("Hassan, Ahmed"));
/// ```
pub fn parse_csv(content: &str) -> ParsedCsv {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return ParsedCsv::default();
    };

    let header_cells: Vec<String> = parse_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut headers: Vec<String> = Vec::with_capacity(header_cells.len());
    for header in &header_cells {
        if !headers.contains(header) {
            headers.push(header.clone());
        }
    }

    let rows = lines
        .map(|line| {
            let values = parse_line(line);
            header_cells
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect::<RawRow>()
        })
        .collect();

    ParsedCsv { headers, rows }
}

/// Split one line into raw (untrimmed) cells.
///
/// Quotes toggle quoted mode, `""` inside quotes is a literal quote and
/// commas only split outside quotes. A quote left open runs to the end of
/// the line.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    cells.push(current);
    cells
}

/// Parse CSV text into JSON objects, one per data row.
pub fn csv_to_json(content: &str) -> Vec<Value> {
    parse_csv(content).rows.iter().map(RawRow::to_json).collect()
}

// =============================================================================
// File Input
// =============================================================================

/// Decode raw bytes as UTF-8, dropping a leading byte order mark.
pub fn decode_content(bytes: &[u8]) -> CsvResult<String> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CsvError::EncodingError(format!("input is not valid UTF-8: {}", e)))?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}

/// Read a CSV file into a string.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<String> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_content(&bytes)
}

/// Read and tokenize a CSV file, rejecting files without data rows.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParsedCsv> {
    let content = read_csv_file(path)?;
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let parsed = parse_csv(&content);
    if parsed.is_empty() {
        return Err(CsvError::NoDataRows);
    }
    Ok(parsed)
}
