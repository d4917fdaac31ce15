//! Field pattern dictionary.
//!
//! Canonical fields and the header aliases that identify them, English and
//! Arabic side by side. Aliases are lowercase and tried in declared order;
//! the first alias contained in a header decides that header's confidence
//! for the field, so longer and more specific aliases are not promoted over
//! earlier short ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical application field that CSV columns are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Names
    FullName,
    FirstName,
    LastName,

    // Contact
    Mobile,
    Email,

    // Lead
    Source,
    Status,
    Type,
    Notes,
    Address,
    Company,
    Budget,
    PropertyType,
    AssignedTo,
    Priority,
    CreatedDate,

    // Property
    Title,
    Description,
    Price,
    Currency,
    Area,
    Bedrooms,
    Bathrooms,
    Location,
    City,
    Region,
    ListingType,
    PropertyStatus,
    Amenities,
    ImageUrl,
    Latitude,
    Longitude,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::Source => "source",
            Self::Status => "status",
            Self::Type => "type",
            Self::Notes => "notes",
            Self::Address => "address",
            Self::Company => "company",
            Self::Budget => "budget",
            Self::PropertyType => "propertyType",
            Self::AssignedTo => "assignedTo",
            Self::Priority => "priority",
            Self::CreatedDate => "createdDate",
            Self::Title => "title",
            Self::Description => "description",
            Self::Price => "price",
            Self::Currency => "currency",
            Self::Area => "area",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::Location => "location",
            Self::City => "city",
            Self::Region => "region",
            Self::ListingType => "listingType",
            Self::PropertyStatus => "propertyStatus",
            Self::Amenities => "amenities",
            Self::ImageUrl => "imageUrl",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }

    /// Aliases declared for this field.
    pub fn aliases(&self) -> &'static [&'static str] {
        FIELD_PATTERNS
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field → aliases, in scan order.
pub static FIELD_PATTERNS: &[(Field, &[&str])] = &[
    // Names
    (
        Field::FullName,
        &[
            "full name", "fullname", "name", "client name", "customer name",
            "lead name", "contact name", "person name", "الاسم", "اسم العميل",
        ],
    ),
    (
        Field::FirstName,
        &[
            "first name", "firstname", "fname", "given name", "forename",
            "الاسم الأول", "الاسم",
        ],
    ),
    (
        Field::LastName,
        &[
            "last name", "lastname", "lname", "surname", "family name",
            "الاسم الأخير", "اسم العائلة",
        ],
    ),
    // Contact
    (
        Field::Mobile,
        &[
            "mobile", "phone", "cell", "mobile number", "phone number",
            "telephone", "contact", "mobile no", "phone no", "tel",
            "رقم الجوال", "رقم الهاتف", "جوال", "هاتف",
        ],
    ),
    (
        Field::Email,
        &["email", "e-mail", "email address", "mail", "البريد الإلكتروني", "ايميل", "بريد"],
    ),
    // Lead
    (
        Field::Source,
        &[
            "source", "lead source", "origin", "channel", "referral",
            "came from", "how did you hear", "المصدر", "مصدر العميل",
        ],
    ),
    (
        Field::Status,
        &["status", "lead status", "state", "stage", "الحالة", "حالة العميل"],
    ),
    (
        Field::Type,
        &[
            "type", "lead type", "category", "classification", "النوع",
            "نوع العميل", "التصنيف",
        ],
    ),
    (
        Field::Notes,
        &[
            "notes", "note", "comments", "comment", "description", "remarks",
            "details", "info", "information", "ملاحظات", "تعليقات", "وصف",
        ],
    ),
    (
        Field::Address,
        &[
            "address", "location", "street", "city", "area", "district",
            "العنوان", "الموقع", "المنطقة",
        ],
    ),
    (
        Field::Company,
        &["company", "organization", "business", "firm", "الشركة", "المؤسسة"],
    ),
    (
        Field::Budget,
        &[
            "budget", "price range", "budget range", "max price", "الميزانية",
            "السعر", "نطاق السعر",
        ],
    ),
    (
        Field::PropertyType,
        &[
            "property type", "type of property", "property category",
            "نوع العقار", "تصنيف العقار",
        ],
    ),
    (
        Field::AssignedTo,
        &["assigned to", "agent", "assigned agent", "owner", "responsible", "المسؤول", "الوكيل"],
    ),
    (
        Field::Priority,
        &["priority", "importance", "urgency", "الأولوية", "الأهمية"],
    ),
    (
        Field::CreatedDate,
        &[
            "created", "date", "created date", "date created", "registration date",
            "التاريخ", "تاريخ الإنشاء",
        ],
    ),
    // Property
    (
        Field::Title,
        &[
            "title", "property title", "name", "property name", "heading",
            "compound", "compound name", "project", "project name",
            "properties name", "properties compound", "property compound",
            "العنوان", "عنوان العقار", "المجمع", "اسم المجمع", "اسم العقار",
        ],
    ),
    (
        Field::Description,
        &[
            "description", "details", "info", "property description", "الوصف",
            "تفاصيل", "معلومات", "property details",
        ],
    ),
    (
        Field::Price,
        &["price", "cost", "amount", "value", "السعر", "القيمة", "التكلفة"],
    ),
    (Field::Currency, &["currency", "money type", "العملة"]),
    (
        Field::Area,
        &[
            "area", "size", "sqm", "square meters", "sqft", "square feet",
            "المساحة", "الحجم",
        ],
    ),
    (
        Field::Bedrooms,
        &["bedrooms", "beds", "bed", "bedroom", "br", "غرف النوم", "غرف"],
    ),
    (
        Field::Bathrooms,
        &["bathrooms", "baths", "bath", "bathroom", "الحمامات", "دورات مياه"],
    ),
    (Field::Location, &["location", "place", "where", "الموقع", "المكان"]),
    (Field::City, &["city", "المدينة"]),
    (
        Field::Region,
        &["region", "area", "district", "neighborhood", "المنطقة", "الحي"],
    ),
    (
        Field::ListingType,
        &["listing type", "for", "sale or rent", "category", "نوع العرض", "للبيع أو الإيجار"],
    ),
    (
        Field::PropertyStatus,
        &["status", "property status", "available", "availability", "حالة العقار"],
    ),
    (
        Field::Amenities,
        &["amenities", "features", "facilities", "المرافق", "المزايا", "الخدمات"],
    ),
    (
        Field::ImageUrl,
        &["image", "photo", "picture", "image url", "photo url", "الصورة", "رابط الصورة"],
    ),
    (Field::Latitude, &["latitude", "lat", "خط العرض"]),
    (Field::Longitude, &["longitude", "lng", "long", "خط الطول"]),
];

/// Human-readable listing of the dictionary.
pub fn fields_description() -> String {
    let mut out = String::from("Canonical fields and header aliases:\n\n");
    for (field, aliases) in FIELD_PATTERNS {
        out.push_str(&format!("{:<16} {}\n", field.as_str(), aliases.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_field_declared_once() {
        let fields: HashSet<Field> = FIELD_PATTERNS.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields.len(), FIELD_PATTERNS.len());
        assert_eq!(fields.len(), 32);
    }

    #[test]
    fn test_aliases_are_lowercase_and_trimmed() {
        for (field, aliases) in FIELD_PATTERNS {
            assert!(!aliases.is_empty(), "{} has no aliases", field);
            for alias in *aliases {
                assert_eq!(*alias, alias.to_lowercase().trim(), "alias '{}' of {}", alias, field);
            }
        }
    }

    #[test]
    fn test_alias_order_preserved() {
        assert_eq!(Field::Mobile.aliases()[0], "mobile");
        assert_eq!(Field::Mobile.aliases()[3], "mobile number");
        assert!(Field::Email.aliases().contains(&"البريد الإلكتروني"));
    }

    #[test]
    fn test_wire_names_match_serde() {
        for (field, _) in FIELD_PATTERNS {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, field.as_str());
        }
    }

    #[test]
    fn test_description_lists_fields() {
        let text = fields_description();
        assert!(text.contains("propertyType"));
        assert!(text.contains("mobile number"));
    }
}
