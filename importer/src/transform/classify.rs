//! Predictive classifiers for categorical fields.
//!
//! Each classifier is an ordered keyword table. A text is lowercased and the
//! first group with a keyword contained in it decides the category; groups
//! declared earlier win conflicts. When nothing matches the classifier's
//! default applies.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9][0-9,]*").expect("valid numeric token pattern"));

/// Prices above this are assumed to be sale prices rather than rents.
pub const SALE_PRICE_THRESHOLD: f64 = 100_000.0;

/// Keywords that all map to one category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub value: &'static str,
}

/// An ordered keyword table with a fallback category.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    pub name: &'static str,
    pub groups: &'static [KeywordGroup],
    pub default: &'static str,
}

impl Classifier {
    /// Category of the first group matching `text`, if any.
    pub fn match_text(&self, text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        self.groups
            .iter()
            .find(|group| group.keywords.iter().any(|k| lower.contains(k)))
            .map(|group| group.value)
    }

    /// Category of `text`, or the default.
    pub fn classify(&self, text: &str) -> &'static str {
        self.match_text(text).unwrap_or(self.default)
    }

    /// Category of a directly mapped cell, falling back to the row text.
    pub fn resolve(&self, mapped: Option<&str>, row_text: &str) -> &'static str {
        mapped
            .and_then(|value| self.match_text(value))
            .unwrap_or_else(|| self.classify(row_text))
    }
}

const fn group(keywords: &'static [&'static str], value: &'static str) -> KeywordGroup {
    KeywordGroup { keywords, value }
}

// =============================================================================
// Lead Tables
// =============================================================================

pub static SOURCE: Classifier = Classifier {
    name: "source",
    groups: &[
        group(&["facebook", "fb"], "Facebook"),
        group(&["instagram", "ig"], "Instagram"),
        group(&["website", "web"], "Website"),
        group(&["referral", "reference"], "Referral"),
        group(&["call", "phone"], "Phone Call"),
        group(&["email", "mail"], "Email"),
        group(&["walk in", "walkin"], "Walk-in"),
    ],
    default: "Other",
};

pub static LEAD_STATUS: Classifier = Classifier {
    name: "leadStatus",
    groups: &[
        group(&["new", "fresh"], "new"),
        group(&["contact", "reach"], "contacted"),
        group(&["qualif"], "qualified"),
        group(&["negot"], "negotiating"),
        group(&["convert", "won", "success"], "converted"),
        group(&["lost", "reject", "cancel"], "lost"),
    ],
    default: "new",
};

pub static LEAD_TYPE: Classifier = Classifier {
    name: "leadType",
    groups: &[
        group(&["buy", "purchase"], "buyer"),
        group(&["sell", "sale"], "seller"),
        group(&["rent", "lease"], "renter"),
        group(&["invest"], "investor"),
    ],
    default: "buyer",
};

// =============================================================================
// Property Tables
// =============================================================================

pub static PROPERTY_TYPE: Classifier = Classifier {
    name: "propertyType",
    groups: &[
        group(&["villa", "فيلا"], "Villa"),
        group(&["apartment", "شقة"], "Apartment"),
        group(&["penthouse", "بنتهاوس"], "Penthouse"),
        group(&["studio", "ستوديو"], "Studio"),
        group(&["townhouse", "تاون هاوس"], "Townhouse"),
        group(&["duplex", "دوبلكس"], "Duplex"),
        group(&["chalet", "شاليه"], "Chalet"),
        group(&["office", "مكتب", "shop", "محل"], "Commercial"),
        group(&["land", "أرض"], "Land"),
    ],
    default: "Apartment",
};

pub static LISTING_TYPE: Classifier = Classifier {
    name: "listingType",
    groups: &[
        group(&["rent", "lease", "للإيجار", "ايجار", "monthly", "شهري"], "For Rent"),
        group(&["sale", "buy", "للبيع", "بيع", "purchase"], "For Sale"),
    ],
    default: "For Sale",
};

/// Listing type of a text, using price magnitude when no keyword matches.
///
/// Numeric tokens have thousands separators removed. Any token above
/// [`SALE_PRICE_THRESHOLD`] means "For Sale"; smaller tokens only mean
/// "For Rent"; no token at all gives the table default.
pub fn classify_listing_type(text: &str) -> &'static str {
    if let Some(value) = LISTING_TYPE.match_text(text) {
        return value;
    }

    let tokens: Vec<f64> = NUMERIC_TOKEN
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .collect();

    if tokens.is_empty() {
        LISTING_TYPE.default
    } else if tokens.iter().any(|n| *n > SALE_PRICE_THRESHOLD) {
        "For Sale"
    } else {
        "For Rent"
    }
}
