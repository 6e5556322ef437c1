//! Forecast source plugins
//!
//! Each source implements [`ForecastParser`] and publishes a
//! [`ParserUnit`] describing the plugins it exports. The units are
//! registered once into the process-wide [`ParserRegistry`].

pub mod registry;
pub mod weather_com_parser;

use crate::domain::{Forecast, ForecastRequest};
use crate::infrastructure::ForecastResult;

pub use registry::{ParserDescriptor, ParserFactory, ParserRegistry, ParserUnit, builtin_units, is_parser_name, parser_registry};
pub use weather_com_parser::WeatherComParser;

/// One upstream forecast source
pub trait ForecastParser {
    /// Fetch, extract and convert the forecasts for `request`, in source
    /// document order
    fn run(&self, request: &ForecastRequest) -> ForecastResult<Vec<Forecast>>;
}
