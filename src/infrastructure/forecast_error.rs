//! Error types surfaced at the request boundary
//!
//! Every failure of a forecast request ends up as one of these. Nothing
//! is retried internally; the caller decides what to do with them.

use thiserror::Error;

use super::parsing_error::ParsingError;
use crate::domain::ForecastType;

/// Broad classification used for exit codes and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Fetch,
    Extraction,
}

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Could not find the area '{area_code}' ({url})")]
    AreaNotFound { area_code: String, url: String },

    #[error("Page request failed: {url} - {reason}")]
    Fetch { url: String, reason: String },

    #[error("Could not parse weather forecast for {forecast_type}: {source}")]
    Extraction {
        forecast_type: ForecastType,
        #[source]
        source: ParsingError,
    },
}

impl ForecastError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn area_not_found(area_code: &str, url: &str) -> Self {
        Self::AreaNotFound {
            area_code: area_code.to_string(),
            url: url.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub const fn extraction(forecast_type: ForecastType, source: ParsingError) -> Self {
        Self::Extraction {
            forecast_type,
            source,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::AreaNotFound { .. } | Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Extraction { .. } => ErrorKind::Extraction,
        }
    }

    /// Process exit status for this failure
    pub const fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::Fetch => 3,
            ErrorKind::Extraction => 4,
        }
    }
}

pub type ForecastResult<T> = Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let config_err = ForecastError::configuration("unknown parser 'nope'");
        assert_eq!(config_err.kind(), ErrorKind::Configuration);
        assert_eq!(config_err.exit_code(), 2);

        let not_found = ForecastError::area_not_found("XXXX0000", "https://weather.com/weather/today/l/XXXX0000");
        assert_eq!(not_found.kind(), ErrorKind::Fetch);

        let fetch = ForecastError::fetch("https://example.com", "connection refused");
        assert_eq!(fetch.exit_code(), 3);
    }

    #[test]
    fn test_extraction_error_names_horizon() {
        let err = ForecastError::extraction(
            ForecastType::Today,
            ParsingError::no_forecast_items("section.today_nowcard-container"),
        );
        assert_eq!(err.exit_code(), 4);
        let message = err.to_string();
        assert!(message.contains("today"));
        assert!(message.contains("today_nowcard-container"));
    }
}
