use super::{ForecastType, Unit};

/// What a source plugin is asked to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub forecast_type: ForecastType,
    pub area_code: String,
    /// Destination unit; `None` keeps the source's native unit
    pub unit: Option<Unit>,
}

impl ForecastRequest {
    pub fn new(forecast_type: ForecastType, area_code: impl Into<String>) -> Self {
        Self {
            forecast_type,
            area_code: area_code.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: Option<Unit>) -> Self {
        self.unit = unit;
        self
    }
}
