//! Infrastructure layer - extraction, conversion, fetching and ambient services
//!
//! Everything a source plugin leans on: markup extraction, unit
//! conversion, page fetching, plus configuration, logging and the error
//! types shared by the whole crate.

pub mod config;
pub mod forecast_error;
pub mod logging;
pub mod page_fetcher;
pub mod parsing;
pub mod parsing_error;
pub mod unit_converter;

// Re-export commonly used items for convenience
pub use config::{AppConfig, DefaultsConfig, FetcherConfig, LoggingConfig};
pub use forecast_error::{ErrorKind, ForecastError, ForecastResult};
pub use logging::{init_logging, init_logging_with_config};
pub use page_fetcher::{FixturePageFetcher, HttpPageFetcher, PageFetcher};
pub use parsing_error::{ParsingError, ParsingResult};
pub use unit_converter::UnitConverter;
