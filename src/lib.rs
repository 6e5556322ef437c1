//! weatherterm - weather forecasts scraped from weather pages
//!
//! A source plugin fetches a forecast page, extracts fields from its
//! markup with declarative criteria, converts temperatures and returns
//! forecast records ready for display.

// Module declarations
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod parsers;

// Re-export the pipeline entry points for easier access
pub use domain::{Forecast, ForecastRequest, ForecastType, Temperature, Unit};
pub use infrastructure::{AppConfig, ForecastError, ForecastResult};
pub use parsers::{ForecastParser, ParserRegistry, parser_registry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
