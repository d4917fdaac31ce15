//! Field mapping and record transformation.
//!
//! This module turns tokenized rows into canonical records:
//! - Dictionary: canonical fields and their header aliases
//! - Detector: header → field assignment with confidence
//! - Normalize: phone, name and number clean-up
//! - Classify: keyword tables for categorical fields
//! - Mapper: per-row lead and property mapping
//! - Pipeline: the import orchestrator

pub mod classify;
pub mod detector;
pub mod dictionary;
pub mod mapper;
pub mod normalize;
pub mod pipeline;

pub use classify::{classify_listing_type, Classifier, KeywordGroup};
pub use detector::{detect, FieldMapping, MappingTable};
pub use dictionary::{fields_description, Field, FIELD_PATTERNS};
pub use mapper::{LeadMapper, PropertyMapper, RecordMapper};
pub use normalize::{clean_phone, coerce_count, coerce_number, coerce_price, combine_name, NumberKind};
pub use pipeline::*;
