//! Parsing error types for markup extraction
//!
//! These describe why a single extraction pass could not produce a
//! forecast. They are wrapped by [`ForecastError::Extraction`] together
//! with the horizon that failed.
//!
//! [`ForecastError::Extraction`]: crate::infrastructure::ForecastError::Extraction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("No forecast items found in '{container}'")]
    NoForecastItems { container: String },

    #[error("Range marker '{marker}' not found in '{text}'")]
    RangeMarkerMissing { marker: char, text: String },

    #[error("Temperature range not found in '{text}'")]
    RangeNotFound { text: String },
}

impl ParsingError {
    pub fn no_forecast_items(container: &str) -> Self {
        Self::NoForecastItems {
            container: container.to_string(),
        }
    }

    pub fn range_marker_missing(marker: char, text: &str) -> Self {
        Self::RangeMarkerMissing {
            marker,
            text: text.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
