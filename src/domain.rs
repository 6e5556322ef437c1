//! Domain module - forecast entities and value objects
//!
//! Everything a source plugin produces or consumes lives here:
//! the forecast record, the requested horizon, temperature units
//! and the request handed to a plugin.

pub mod forecast;
pub mod request;
pub mod unit;

// Re-export commonly used items for convenience
pub use forecast::{Forecast, ForecastType, Temperature};
pub use request::ForecastRequest;
pub use unit::Unit;
