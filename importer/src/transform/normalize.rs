//! Value normalizers.
//!
//! Pure transforms applied to raw cell values: phone cleaning, name
//! combination and best-effort numeric coercion. None of them fail; unusable
//! input degrades to a default or to `None`.

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; Arabic-Indic digits are dropped.

static NON_PHONE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9+]").expect("valid phone pattern"));

static NON_NUMERIC_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("valid numeric pattern"));

static LEADING_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)").expect("valid decimal pattern"));

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("valid integer pattern"));

/// Placeholder name for a lead without any name cell.
pub const NO_NAME: &str = "No Name";

/// Egyptian country code assumed for local 11-digit mobile numbers.
const DEFAULT_COUNTRY_CODE: &str = "+20";

// =============================================================================
// Phone
// =============================================================================

/// Normalize a phone number.
///
/// Keeps ASCII digits and `+`, turns a `00` prefix into `+`, and rewrites a local
/// 11-digit number starting with `0` to `+20`.
///
/// # Example
/// ```
/// use crm_import::clean_phone;
///
/// assert_eq!(clean_phone("010 1234-5678"), "+201012345678");
/// assert_eq!(clean_phone("0020101234567"), "+20101234567");
/// ```
pub fn clean_phone(raw: &str) -> String {
    let mut cleaned = NON_PHONE_CHARS.replace_all(raw, "").into_owned();

    if let Some(rest) = cleaned.strip_prefix("00") {
        cleaned = format!("+{}", rest);
    }

    if !cleaned.starts_with('+') && cleaned.len() == 11 && cleaned.starts_with('0') {
        cleaned = format!("{}{}", DEFAULT_COUNTRY_CODE, &cleaned[1..]);
    }

    cleaned
}

// =============================================================================
// Name
// =============================================================================

/// Build a display name from full or first/last name cells.
///
/// A non-blank full name wins. Otherwise first and last are joined with one
/// space, falling back to [`NO_NAME`].
pub fn combine_name(first: Option<&str>, last: Option<&str>, full: Option<&str>) -> String {
    if let Some(full) = full.map(str::trim).filter(|f| !f.is_empty()) {
        return full.to_string();
    }

    let first = first.map(str::trim).unwrap_or("");
    let last = last.map(str::trim).unwrap_or("");
    let combined = format!("{} {}", first, last).trim().to_string();

    if combined.is_empty() {
        NO_NAME.to_string()
    } else {
        combined
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// How a numeric cell is coerced and what happens when it holds no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Decimal; defaults to `0`.
    Price,
    /// Decimal; absent when unusable.
    Area,
    /// Whole number (bedrooms, bathrooms); absent when unusable.
    Count,
    /// Decimal (latitude, longitude); absent when unusable.
    Coordinate,
}

impl NumberKind {
    fn is_integer(&self) -> bool {
        matches!(self, Self::Count)
    }

    fn defaults_to_zero(&self) -> bool {
        matches!(self, Self::Price)
    }
}

/// Coerce a raw cell into a number.
///
/// Every character other than ASCII digits and `.` is dropped, then the leading
/// number is read (decimal or integer per `kind`). An unusable or zero value
/// is `Some(0.0)` for [`NumberKind::Price`] and `None` for every other kind.
pub fn coerce_number(raw: &str, kind: NumberKind) -> Option<f64> {
    let cleaned = NON_NUMERIC_CHARS.replace_all(raw, "");

    let pattern = if kind.is_integer() {
        &*LEADING_INTEGER
    } else {
        &*LEADING_DECIMAL
    };

    let parsed = pattern
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n != 0.0);

    match parsed {
        Some(n) => Some(n),
        None if kind.defaults_to_zero() => Some(0.0),
        None => None,
    }
}

/// Price of a cell, `0` when it holds no number.
pub fn coerce_price(raw: &str) -> f64 {
    coerce_number(raw, NumberKind::Price).unwrap_or(0.0)
}

/// Whole-number count of a cell.
pub fn coerce_count(raw: &str) -> Option<u32> {
    coerce_number(raw, NumberKind::Count)
        .filter(|n| *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_phone_local_egyptian() {
        assert_eq!(clean_phone("01012345678"), "+201012345678");
        assert_eq!(clean_phone("(010) 0123-4567"), "+201001234567");
    }

    #[test]
    fn test_clean_phone_double_zero_prefix() {
        assert_eq!(clean_phone("0020101234567"), "+20101234567");
        assert_eq!(clean_phone("00 971 50 123 4567"), "+971501234567");
    }

    #[test]
    fn test_clean_phone_left_alone() {
        assert_eq!(clean_phone("+201001234567"), "+201001234567");
        assert_eq!(clean_phone("12345"), "12345");
        assert_eq!(clean_phone("0101234567"), "0101234567");
        assert_eq!(clean_phone(""), "");
        assert_eq!(clean_phone("n/a"), "");
    }

    #[test]
    fn test_clean_phone_drops_arabic_indic_digits() {
        assert_eq!(clean_phone("٠١٠١٢٣٤٥٦٧٨"), "");
        assert_eq!(clean_phone("01٠12345678"), "0112345678");
        assert_eq!(clean_phone("01012345678 ٠"), "+201012345678");
    }

    #[test]
    fn test_combine_name() {
        assert_eq!(combine_name(None, None, None), "No Name");
        assert_eq!(combine_name(Some("Ahmed"), Some("Gomaa"), None), "Ahmed Gomaa");
        assert_eq!(combine_name(Some(" Ahmed "), None, None), "Ahmed");
        assert_eq!(combine_name(None, Some("Gomaa"), Some("  ")), "Gomaa");
        assert_eq!(
            combine_name(Some("Ahmed"), Some("Gomaa"), Some("Sara Mohamed")),
            "Sara Mohamed"
        );
        assert_eq!(combine_name(Some(""), Some(" "), Some("")), "No Name");
    }

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price("2,000,000 EGP"), 2_000_000.0);
        assert_eq!(coerce_price("$1,250.50"), 1250.5);
        assert_eq!(coerce_price("call for price"), 0.0);
        assert_eq!(coerce_price(""), 0.0);
    }

    #[test]
    fn test_coerce_optional_kinds_absent_not_zero() {
        assert_eq!(coerce_number("", NumberKind::Area), None);
        assert_eq!(coerce_number("n/a", NumberKind::Coordinate), None);
        assert_eq!(coerce_number("0", NumberKind::Area), None);
        assert_eq!(coerce_count("studio"), None);
        assert_eq!(coerce_count("٣"), None);
        assert_eq!(coerce_price("٥٠٠٠٠٠"), 0.0);
    }

    #[test]
    fn test_coerce_decimal_prefix() {
        assert_eq!(coerce_number("250 sqm", NumberKind::Area), Some(250.0));
        assert_eq!(coerce_number("1.2.3", NumberKind::Area), Some(1.2));
        assert_eq!(coerce_number("30.0444", NumberKind::Coordinate), Some(30.0444));
        assert_eq!(coerce_number(".5", NumberKind::Area), Some(0.5));
    }

    #[test]
    fn test_coerce_count_truncates() {
        assert_eq!(coerce_count("3 BR"), Some(3));
        assert_eq!(coerce_count("2.5"), Some(2));
        assert_eq!(coerce_number("4 beds", NumberKind::Count), Some(4.0));
    }
}
