//! Criteria-driven markup extraction
//!
//! Sources describe the fields they want as (tag, class) selectors keyed by
//! field name. The extractor walks a container and returns one field map per
//! matched item; the mapper renames source-specific keys to the canonical
//! names below; the pattern helpers turn temperature text into numbers.

pub mod criteria;
pub mod extractor;
pub mod field_mapper;
pub mod patterns;

// Re-export public types
pub use super::parsing_error::{ParsingError, ParsingResult};
pub use criteria::{ExtractionCriteria, FieldMap, FieldSelector};
pub use extractor::{element_text, extract_fields, find_element, parse_forecast_list};
pub use field_mapper::FieldMapper;
pub use patterns::{PLACEHOLDER, clean_digits, parse_high_low, parse_temperature_range, split_date_cell};

/// Canonical field names shared by every source
pub mod fields {
    pub const DATE: &str = "date";
    pub const DAY: &str = "day";
    /// Combined "date + day detail" cell, split after its first three characters
    pub const DATE_CELL: &str = "date_cell";
    pub const DESCRIPTION: &str = "description";
    pub const TEMPERATURE: &str = "temperature";
    pub const WIND: &str = "wind";
    pub const HUMIDITY: &str = "humidity";
}
