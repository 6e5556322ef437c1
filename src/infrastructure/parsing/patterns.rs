//! Regex helpers for temperature and date text

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParsingError, ParsingResult};

/// Sentinel meaning "value unavailable"
pub const PLACEHOLDER: &str = "--";

static LEADING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("valid leading digits regex"));

static HIGH_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"H\s+(\d+|-{0,2})").expect("valid high marker regex"));

static LOW_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"L\s+(\d+|-{0,2})").expect("valid low marker regex"));

// "75°/60°", "75/60", "--/44°"; a numeric high must be followed by a
// separator before the low
static TEMPERATURE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(\d+)\D{1,3}|(--)\D{0,3})(\d+|--)").expect("valid temperature span regex")
});

/// Leading run of ASCII digits, or [`PLACEHOLDER`] when `text` does not
/// start with one
pub fn clean_digits(text: &str) -> String {
    LEADING_DIGITS
        .find(text)
        .map_or_else(|| PLACEHOLDER.to_string(), |m| m.as_str().to_string())
}

/// Read an `H <high> L <low>` pair
pub fn parse_high_low(text: &str) -> ParsingResult<(String, String)> {
    let high = capture(&HIGH_MARKER, text).ok_or_else(|| ParsingError::range_marker_missing('H', text))?;
    let low = capture(&LOW_MARKER, text).ok_or_else(|| ParsingError::range_marker_missing('L', text))?;
    Ok((high, low))
}

/// Read a high/low pair from either the marker form or a `75°/60°` span
pub fn parse_temperature_range(text: &str) -> ParsingResult<(String, String)> {
    if HIGH_MARKER.is_match(text) || LOW_MARKER.is_match(text) {
        return parse_high_low(text);
    }

    TEMPERATURE_SPAN
        .captures(text)
        .and_then(|caps| {
            let high = caps.get(1).or_else(|| caps.get(2))?;
            Some((high.as_str().to_string(), caps[3].to_string()))
        })
        .ok_or_else(|| ParsingError::RangeNotFound {
            text: text.to_string(),
        })
}

/// Split a combined date cell (`"SATMAR 9"`) after its first three
/// characters into `(date, day)`, both trimmed
pub fn split_date_cell(text: &str) -> (String, String) {
    let text = text.trim();
    let split_at = text.char_indices().nth(3).map_or(text.len(), |(idx, _)| idx);
    let (date, day) = text.split_at(split_at);
    (date.trim().to_string(), day.trim().to_string())
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
